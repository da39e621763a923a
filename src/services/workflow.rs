//! # 笔记处理工作流
//!
//! 串联一次完整处理的各个阶段：
//!
//! ```text
//! 入口校验 → 提示词选择（前端） → 请求生成 → 格式化 → 替换文档
//!            （任一阶段失败 → 错误通知 → 回到空闲）
//! ```
//!
//! 数据单向流动：笔记原文 + 提示词 → 生成客户端 → 生成文本 → 替换文档。
//! 无反馈回路、无队列、无缓存。失败时不产生任何文档变更——
//! 替换内容只在生成调用完全成功之后才会被组装出来。
//!
//! 提示词选择本身是前端的交互环节（列表选择器 / 重跑上次），
//! 本模块承接选定提示词之后的所有步骤。

use crate::models::prompt::Prompt;
use crate::services::formatter::{self, ProcessedDocument};
use crate::services::ollama::OllamaClient;
use crate::utils::error::ProcessError;

/// 原文起始分隔标记
///
/// 与 [`TEXT_END_MARKER`] 一起包裹注入提示词的笔记原文，
/// 提示词作者可以在正文中显式引用这对标记来说明原文的位置。
pub const TEXT_BEGIN_MARKER: &str = "====TEXT_BEGIN====";

/// 原文结束分隔标记
pub const TEXT_END_MARKER: &str = "====TEXT_END====";

/// 入口校验：确认存在非空的笔记文档
///
/// 必须在任何网络调用之前执行（快速失败）。
///
/// # 参数
/// - `document` - 前端传入的当前文档内容；`None` 表示没有激活的笔记
///
/// # 返回值
/// 校验通过时返回文档文本的引用
///
/// # 错误
/// - `NoActiveDocument` - 没有激活的笔记
/// - `EmptyDocument` - 文档内容为空白
pub fn validate_document(document: Option<&str>) -> Result<&str, ProcessError> {
    let text = document.ok_or(ProcessError::NoActiveDocument)?;
    if text.trim().is_empty() {
        return Err(ProcessError::EmptyDocument);
    }
    Ok(text)
}

/// 构建合并提示词：模板正文 + 分隔标记包裹的笔记原文
///
/// # 参数
/// - `prompt_body` - 提示词模板正文
/// - `original` - 笔记原文
pub fn build_combined_prompt(prompt_body: &str, original: &str) -> String {
    format!(
        "{}\n\n{}\n{}\n{}",
        prompt_body, TEXT_BEGIN_MARKER, original, TEXT_END_MARKER
    )
}

/// 执行「请求生成 → 格式化」两个阶段
///
/// 调用方（command 层）负责在此之前完成入口校验、提示词解析和
/// `lastUsedPromptId` 的持久化。
///
/// # 参数
/// - `client` - 生成客户端
/// - `model_name` - 使用的模型名称
/// - `prompt` - 选定的提示词模板
/// - `original` - 已通过校验的笔记原文
///
/// # 返回值
/// 组装好的替换文档（内容 + 光标行号）
///
/// # 错误
/// 透传生成客户端的 `ServiceUnavailable` / `InputTooLarge`。
pub async fn process_document(
    client: &OllamaClient,
    model_name: &str,
    prompt: &Prompt,
    original: &str,
) -> Result<ProcessedDocument, ProcessError> {
    // ---- 阶段 1：请求生成 ----
    let combined = build_combined_prompt(&prompt.body, original);
    let generated = client
        .generate(
            model_name,
            &combined,
            prompt.system_instruction.as_deref(),
        )
        .await?;

    // ---- 阶段 2：格式化替换文档 ----
    Ok(formatter::render_document(&generated, original))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_prompt() -> Prompt {
        Prompt {
            id: "p-1".to_string(),
            name: "纪要".to_string(),
            body: "整理以下内容".to_string(),
            system_instruction: None,
        }
    }

    #[test]
    fn test_validate_document_missing() {
        let err = validate_document(None).expect_err("无文档应报错");
        assert!(matches!(err, ProcessError::NoActiveDocument));
    }

    #[test]
    fn test_validate_document_blank() {
        let err = validate_document(Some("  \n\t ")).expect_err("空白文档应报错");
        assert!(matches!(err, ProcessError::EmptyDocument));
    }

    #[test]
    fn test_validate_document_passes_text_through() {
        let text = validate_document(Some("会议记录原文")).expect("非空文档应通过");
        assert_eq!(text, "会议记录原文");
    }

    #[test]
    fn test_combined_prompt_wraps_original_with_markers() {
        let combined = build_combined_prompt("整理以下内容", "原文第一行\n原文第二行");
        assert!(combined.starts_with("整理以下内容"));

        // 原文位于两个分隔标记之间
        let begin = combined.find(TEXT_BEGIN_MARKER).expect("应含起始标记");
        let end = combined.find(TEXT_END_MARKER).expect("应含结束标记");
        assert!(begin < end);
        let between = &combined[begin + TEXT_BEGIN_MARKER.len()..end];
        assert!(between.contains("原文第一行\n原文第二行"));
    }

    #[tokio::test]
    async fn test_process_document_service_down_produces_no_document() {
        // 本机保留端口，连接必然被拒绝：工作流应以 ServiceUnavailable 结束，
        // 不产生任何替换文档
        let client = OllamaClient::new("http://127.0.0.1:9");
        let err = process_document(&client, "llama3.1", &sample_prompt(), "原文")
            .await
            .expect_err("服务不可达应报错");
        assert!(matches!(err, ProcessError::ServiceUnavailable(_)));
    }
}
