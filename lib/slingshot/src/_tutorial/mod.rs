//! # Tutorial: Calling REST APIs with slingshot
//!
//! Learn to describe and send HTTP requests step by step.
//!
//! ## Chapters
//!
//! 1. [Getting Started][chapter_0] - Your first request
//! 2. [Parameters & Bodies][chapter_1] - Query strings, forms, JSON
//! 3. [Response Handling][chapter_2] - Deserialization and errors
//! 4. [Executors & Middleware][chapter_3] - Timeouts, logging, test doubles
//!
//! Ready? Start with [Chapter 0: Getting Started][chapter_0].

pub mod chapter_0;
pub mod chapter_1;
pub mod chapter_2;
pub mod chapter_3;
