//! Upload Server - 本地文件上传服务
//!
//! 基于 Actix Web 构建的 multipart 文件上传服务。
//!
//! # 架构
//! - `config`: 配置管理
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `routes`: 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 上传逻辑与进度上报
//! - `storage`: 本地文件存储
//! - `utils`: 工具函数

pub mod config;
pub mod errors;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
