//! # 提示词目录 Tauri Commands
//!
//! 提供提示词模板管理的 Tauri command 处理函数：
//! - `list_prompts` - 获取提示词列表（提示词表格和选择器的数据源）
//! - `create_prompt` / `update_prompt` / `delete_prompt` - 增删改
//! - `export_prompts` / `import_prompts` - 批量导出 / 导入
//!
//! 每个修改类 command 都遵循「修改内存态 → 立即整体持久化」的约定，
//! 不做批量合并。文件选择和读写由前端通过 dialog / fs 插件完成，
//! 导入导出 command 只负责 JSON 字符串与目录之间的转换。

use tauri::State;

use crate::models::prompt::Prompt;
use crate::services::catalog::{self, ImportMode};
use crate::services::store::ConfigStore;

/// 获取当前的提示词列表
///
/// # 返回值
/// 提示词列表的克隆，保持用户定义的顺序
#[tauri::command]
pub async fn list_prompts(store: State<'_, ConfigStore>) -> Result<Vec<Prompt>, String> {
    Ok(store.snapshot().map_err(String::from)?.prompts)
}

/// 创建新提示词
///
/// 生成唯一 id 并追加到目录末尾，随后持久化。
///
/// # 参数
/// - `name` - 提示词名称
/// - `body` - 提示词正文
/// - `system_instruction` - 系统指令（可选）
///
/// # 返回值
/// 新建的提示词对象（含生成的 id），前端用于刷新表格
///
/// # 错误
/// 名称或正文为空、或持久化失败时返回错误信息
#[tauri::command]
pub async fn create_prompt(
    store: State<'_, ConfigStore>,
    name: String,
    body: String,
    system_instruction: Option<String>,
) -> Result<Prompt, String> {
    let (created, snapshot) = store
        .try_update(|c| {
            catalog::create(&mut c.prompts, &name, &body, system_instruction.as_deref())
        })
        .map_err(String::from)?;
    ConfigStore::persist(&snapshot).await.map_err(String::from)?;
    Ok(created)
}

/// 更新现有提示词
///
/// # 参数
/// - `id` - 要更新的提示词 id
/// - `name` / `body` / `system_instruction` - 新字段值
///
/// # 错误
/// id 不存在、字段校验失败或持久化失败时返回错误信息
#[tauri::command]
pub async fn update_prompt(
    store: State<'_, ConfigStore>,
    id: String,
    name: String,
    body: String,
    system_instruction: Option<String>,
) -> Result<(), String> {
    let (_, snapshot) = store
        .try_update(|c| {
            catalog::update(
                &mut c.prompts,
                &id,
                &name,
                &body,
                system_instruction.as_deref(),
            )
        })
        .map_err(String::from)?;
    ConfigStore::persist(&snapshot).await.map_err(String::from)
}

/// 删除提示词
///
/// id 不存在时静默无操作。不清理 `lastUsedPromptId` 的悬空引用：
/// 「重跑上次提示词」会在查找失败时报告「没有上次提示词」。
///
/// # 参数
/// - `id` - 要删除的提示词 id
///
/// # 错误
/// 持久化失败时返回错误信息
#[tauri::command]
pub async fn delete_prompt(store: State<'_, ConfigStore>, id: String) -> Result<(), String> {
    let (_, snapshot) = store
        .update(|c| catalog::delete(&mut c.prompts, &id))
        .map_err(String::from)?;
    ConfigStore::persist(&snapshot).await.map_err(String::from)
}

/// 导出提示词列表为 JSON 字符串
///
/// 前端将返回的字符串写入用户通过保存对话框选择的文件。
///
/// # 返回值
/// 带缩进格式化的 JSON 数组字符串
#[tauri::command]
pub async fn export_prompts(store: State<'_, ConfigStore>) -> Result<String, String> {
    let config = store.snapshot().map_err(String::from)?;
    catalog::export_json(&config.prompts).map_err(String::from)
}

/// 从 JSON 字符串批量导入提示词
///
/// 导入是全有或全无的：任何一条记录不合格，整个导入失败，
/// 现有目录保持原样（详见 `services::catalog`）。
///
/// # 参数
/// - `data` - JSON 数组字符串（前端从用户选择的文件中读取）
/// - `mode` - 导入模式：`"replace"` 整体替换 / `"merge"` 跳过冲突后合并
///
/// # 返回值
/// 实际导入的记录条数
///
/// # 错误
/// 解析失败、记录校验失败或持久化失败时返回错误信息
#[tauri::command]
pub async fn import_prompts(
    store: State<'_, ConfigStore>,
    data: String,
    mode: ImportMode,
) -> Result<usize, String> {
    let (applied, snapshot) = store
        .try_update(|c| catalog::import_json(&mut c.prompts, &data, mode))
        .map_err(String::from)?;
    ConfigStore::persist(&snapshot).await.map_err(String::from)?;
    log::info!("提示词导入完成: 模式 {:?}，应用 {} 条记录", mode, applied);
    Ok(applied)
}
