//! Domain Layer - 领域层
//!
//! Speech Context: 合成请求值对象与音频流重分块

pub mod speech;
