//! # 笔记处理 Tauri Commands
//!
//! 提供笔记处理工作流的两个入口 command（对应前端注册的两条编辑器命令）：
//! - `process_with_prompt` - 使用指定提示词处理当前笔记
//! - `rerun_last_prompt` - 使用上次用过的提示词再跑一次
//!
//! 两者共享同一条执行路径：
//! 1. 入口校验（无文档 / 空文档快速失败，不发起任何网络调用）
//! 2. 解析提示词（显式 id 或 `lastUsedPromptId` 弱引用，使用时重新查找）
//! 3. 把选中的 id 持久化为新的 `lastUsedPromptId` ——
//!    即使后续生成调用失败也先落盘，保证「重跑上次」重试的是同一条提示词
//! 4. 请求生成 + 格式化，返回替换文档
//!
//! command 返回 `Err` 即代表工作流进入错误终态：前端弹出包含底层原因的
//! 临时通知后回到空闲状态，文档不发生任何变更。

use tauri::State;

use crate::models::prompt::Prompt;
use crate::services::catalog;
use crate::services::formatter::ProcessedDocument;
use crate::services::ollama::OllamaClient;
use crate::services::store::ConfigStore;
use crate::services::workflow;
use crate::utils::error::ProcessError;

/// 使用指定提示词处理当前笔记
///
/// # 参数
/// - `document` - 当前笔记的完整文本；前端没有激活笔记时传 `null`
/// - `prompt_id` - 用户在选择器中选中的提示词 id
///
/// # 返回值
/// 替换文档（完整内容 + 光标行号），前端据此重写笔记并定位光标
///
/// # 错误
/// 入口校验、提示词查找、生成调用任一环节失败时返回错误信息
#[tauri::command]
pub async fn process_with_prompt(
    store: State<'_, ConfigStore>,
    document: Option<String>,
    prompt_id: String,
) -> Result<ProcessedDocument, String> {
    run_workflow(&store, document, PromptChoice::ById(&prompt_id))
        .await
        .map_err(String::from)
}

/// 使用上次用过的提示词再处理一次当前笔记
///
/// `lastUsedPromptId` 是弱引用：此处按 id 重新查找，
/// 未设置或对应提示词已被删除（悬空引用）时均报告「没有上次提示词」。
///
/// # 参数
/// - `document` - 当前笔记的完整文本；前端没有激活笔记时传 `null`
///
/// # 错误
/// 没有可用的上次提示词记录，或工作流任一环节失败时返回错误信息
#[tauri::command]
pub async fn rerun_last_prompt(
    store: State<'_, ConfigStore>,
    document: Option<String>,
) -> Result<ProcessedDocument, String> {
    run_workflow(&store, document, PromptChoice::LastUsed)
        .await
        .map_err(String::from)
}

/// 提示词选择方式
enum PromptChoice<'a> {
    /// 使用指定 id 的提示词
    ById(&'a str),
    /// 使用 `lastUsedPromptId` 指向的提示词
    LastUsed,
}

/// 工作流共享执行路径（见模块级说明的四个步骤）
async fn run_workflow(
    store: &ConfigStore,
    document: Option<String>,
    choice: PromptChoice<'_>,
) -> Result<ProcessedDocument, ProcessError> {
    // ---- 步骤 1：入口校验（任何网络调用之前） ----
    let original = workflow::validate_document(document.as_deref())?;

    // ---- 步骤 2：解析提示词 ----
    let config = store.snapshot()?;
    let prompt: Prompt = match choice {
        PromptChoice::ById(id) => catalog::find(&config.prompts, id)
            .cloned()
            .ok_or_else(|| ProcessError::NotFound(id.to_string()))?,
        PromptChoice::LastUsed => {
            // 弱引用必须在使用时重新解析；未设置或悬空一律视为「没有上次提示词」
            let last_id = config
                .last_used_prompt_id
                .as_deref()
                .ok_or(ProcessError::NoLastPrompt)?;
            catalog::find(&config.prompts, last_id)
                .cloned()
                .ok_or(ProcessError::NoLastPrompt)?
        }
    };

    // ---- 步骤 3：先记录 lastUsedPromptId，再发起生成调用 ----
    // 刻意安排在生成之前：生成失败后「重跑上次」仍然指向本次选中的提示词。
    // 持久化失败只记录警告，不阻断处理流程（内存态已更新）
    let (_, snapshot) = store.update(|c| {
        c.last_used_prompt_id = Some(prompt.id.clone());
    })?;
    if let Err(e) = ConfigStore::persist(&snapshot).await {
        log::warn!("记录上次提示词失败: {}", e);
    }

    // ---- 步骤 4：请求生成 + 格式化 ----
    log::info!(
        "开始处理笔记: 提示词「{}」，模型 {}",
        prompt.name,
        config.default_model_name
    );
    let client = OllamaClient::new(&config.service_base_url);
    let result = workflow::process_document(
        &client,
        &config.default_model_name,
        &prompt,
        original,
    )
    .await;

    match &result {
        Ok(_) => log::info!("笔记处理完成: 提示词「{}」", prompt.name),
        Err(e) => log::warn!("笔记处理失败: {}", e),
    }
    result
}
