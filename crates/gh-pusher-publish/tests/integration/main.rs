// Copyright 2026 Oxide Computer Company

//! Integration tests for gh-pusher-publish.

mod publish;
