// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Tokio-based file reading implementation for the dragonchain SDK.
//!
//! This crate provides `TokioFileRead`, an async file reader that implements
//! the `FileRead` trait from `dragonchain_core` using Tokio's file system
//! operations. The SDK uses it to read credentials files and smart contract
//! secret mounts.
//!
//! ## Example
//!
//! ```no_run
//! use dragonchain_core::Context;
//! use dragonchain_file_read_tokio::TokioFileRead;
//! # use async_trait::async_trait;
//! # #[derive(Debug)]
//! # struct NoHttp;
//! # #[async_trait]
//! # impl dragonchain_core::HttpSend for NoHttp {
//! #     async fn http_send(
//! #         &self,
//! #         _: http::Request<bytes::Bytes>,
//! #     ) -> dragonchain_core::Result<http::Response<bytes::Bytes>> {
//! #         unimplemented!()
//! #     }
//! # }
//!
//! #[tokio::main]
//! async fn main() {
//!     let ctx = Context::new(TokioFileRead, NoHttp);
//!
//!     match ctx.file_read("/path/to/credentials").await {
//!         Ok(content) => println!("Read {} bytes", content.len()),
//!         Err(e) => eprintln!("Failed to read file: {e}"),
//!     }
//! }
//! ```

use async_trait::async_trait;
use dragonchain_core::{Error, FileRead, Result};

/// Tokio-based implementation of the `FileRead` trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileRead;

#[async_trait]
impl FileRead for TokioFileRead {
    async fn file_read(&self, path: &str) -> Result<Vec<u8>> {
        tokio::fs::read(path)
            .await
            .map_err(|e| Error::unexpected("failed to read file").with_source(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_read_existing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "auth_key_contents").unwrap();

        let content = TokioFileRead
            .file_read(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(content, b"auth_key_contents");
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let result = TokioFileRead.file_read("/definitely/not/a/file").await;
        assert!(result.is_err());
    }
}
