//! # 通用工具模块
//!
//! 包含跨模块复用的基础工具：
//! - `path` - 配置目录路径获取
//! - `error` - 处理流程错误分类定义

pub mod error;
pub mod path;
