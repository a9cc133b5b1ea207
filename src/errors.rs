// ABOUTME: Error types for the teardown tool, re-exported from teardown-core
// ABOUTME: AppError and ErrorCode for the workflow, CloudError for service calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! The definitions live in `teardown-core` so the provider crate can raise
//! the same types. This module re-exports them under `stack_teardown::errors`.

pub use teardown_core::errors::{
    AppError, AppResult, CloudError, CloudResult, ErrorCode, ErrorContext,
};
