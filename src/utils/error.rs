//! # 处理流程错误分类
//!
//! 定义笔记处理流程中所有可预期的失败类别。所有错误在 command 边界
//! 统一转换为 `String` 返回给前端，由前端以临时通知（toast）的形式展示，
//! 任何失败都不会导致应用退出。
//!
//! ## 错误分类
//! - 文档入口校验：`NoActiveDocument` / `EmptyDocument`
//! - 提示词解析：`NoLastPrompt` / `NotFound` / `Validation`
//! - Ollama 服务调用：`ServiceUnavailable` / `InputTooLarge`
//! - 导入导出：`InvalidImportFormat`
//! - 配置持久化：`Storage`

use thiserror::Error;

/// 笔记处理流程的错误类型
///
/// 每个变体对应一类用户可见的失败场景，`Display` 输出即前端通知文案。
#[derive(Error, Debug)]
pub enum ProcessError {
    /// 前端未传入文档内容（没有处于激活状态的笔记）
    #[error("没有打开的笔记文档")]
    NoActiveDocument,

    /// 当前文档内容为空白
    #[error("当前笔记内容为空")]
    EmptyDocument,

    /// 「重跑上次提示词」时没有可用的上次记录
    /// （从未使用过，或上次使用的提示词已被删除）
    #[error("没有可用的上次提示词记录")]
    NoLastPrompt,

    /// Ollama 服务不可达：网络传输错误或返回了非成功状态码
    #[error("Ollama 服务不可用: {0}")]
    ServiceUnavailable(String),

    /// 预检失败：估算 token 数达到或超过模型上下文上限
    ///
    /// 该检查基于 `ceil(字符数 / 4)` 的启发式估算，属于提前拦截，
    /// 不代表服务端的精确判定。
    #[error("输入过长: 估算 {estimated} tokens，达到模型上下文上限 {limit}")]
    InputTooLarge {
        /// 启发式估算出的 token 数
        estimated: u64,
        /// 模型元数据报告的上下文长度上限
        limit: u64,
    },

    /// 导入的提示词列表格式无效（解析失败或存在字段缺失的记录）
    #[error("导入格式无效: {0}")]
    InvalidImportFormat(String),

    /// 按 id 查找提示词失败（编辑/更新了不存在的条目）
    #[error("未找到提示词: {0}")]
    NotFound(String),

    /// 提示词字段校验失败（如名称或内容为空）
    #[error("提示词校验失败: {0}")]
    Validation(String),

    /// 配置读写失败（目录创建、序列化或文件写入错误）
    #[error("配置存储失败: {0}")]
    Storage(String),
}

/// 在 command 边界将错误转换为前端可展示的字符串
impl From<ProcessError> for String {
    fn from(err: ProcessError) -> String {
        err.to_string()
    }
}
