//! # OllamaNotes - Tauri 应用核心初始化模块
//!
//! 本模块负责 Tauri 应用的完整初始化流程，包括：
//! - 注册 Tauri 官方插件（文件系统、对话框、日志）
//! - 注册自定义 Tauri commands（配置管理、提示词目录、笔记处理）
//! - 初始化应用全局状态（配置存储）
//! - 生成应用上下文并启动事件循环
//!
//! ## 架构说明
//! 通过将核心逻辑放在 `lib.rs` 而非 `main.rs` 中，
//! Tauri 可以在桌面端（`main.rs`）和移动端入口之间共享此初始化代码。
//!
//! ## 模块结构
//! - `commands/` - Tauri command 处理函数（IPC 接口层）
//! - `models/` - 数据模型（对应前端 TypeScript 类型）
//! - `services/` - 核心业务逻辑（生成客户端、提示词目录、处理工作流）
//! - `utils/` - 通用工具函数（路径、错误分类）

mod commands;
mod models;
mod services;
mod utils;

use services::store::ConfigStore;

// `#[cfg_attr(mobile, tauri::mobile_entry_point)]`：条件编译属性
// 当目标平台为移动端（Android/iOS）时，此属性将 `run()` 函数标记为
// Tauri 移动端入口点，使移动端运行时能够正确定位并调用该函数。
// 在桌面端编译时，此属性不生效，`run()` 由 `main.rs` 直接调用。
#[cfg_attr(mobile, tauri::mobile_entry_point)]
/// Tauri 应用启动函数
///
/// 构建并运行 Tauri 应用实例。该函数完成以下工作：
/// 1. 创建 `tauri::Builder` 默认实例
/// 2. 注册所需的 Tauri 插件（文件系统、对话框）
/// 3. 初始化应用全局状态（从磁盘加载一次配置到 ConfigStore）
/// 4. 注册所有自定义 Tauri commands
/// 5. 在 `setup` 钩子中按需注册调试专用插件（日志）
/// 6. 生成应用上下文并启动主事件循环
///
/// # Panics
/// 如果 Tauri 应用启动失败（例如配置文件缺失或窗口创建失败），
/// 将通过 `.expect()` 触发 panic 并输出错误信息。
pub fn run() {
    tauri::Builder::default()
        // === 官方插件注册 ===
        // 文件系统插件：供前端读写提示词导入/导出文件
        .plugin(tauri_plugin_fs::init())
        // 对话框插件：提供导入/导出时的原生文件选择器
        .plugin(tauri_plugin_dialog::init())
        // === 应用全局状态初始化 ===
        // 注册 ConfigStore 为 Tauri managed state，所有 command 函数可通过
        // `State<ConfigStore>` 参数注入访问。配置在此处从
        // `~/.mo/OllamaNotes/config.json` 加载一次，此后的每次修改都会整体写回。
        .manage(ConfigStore::load())
        // === 自定义 Tauri Commands 注册 ===
        // 所有 command 函数通过 `invoke_handler` 注册，前端通过 `invoke()` 调用
        .invoke_handler(tauri::generate_handler![
            // 配置和模型列表 commands
            commands::settings::get_config,
            commands::settings::save_config,
            commands::settings::list_models,
            // 提示词目录 commands
            commands::prompts::list_prompts,
            commands::prompts::create_prompt,
            commands::prompts::update_prompt,
            commands::prompts::delete_prompt,
            commands::prompts::export_prompts,
            commands::prompts::import_prompts,
            // 笔记处理 commands
            commands::process::process_with_prompt,
            commands::process::rerun_last_prompt,
        ])
        // `setup` 闭包：在应用窗口创建之前执行的初始化钩子
        .setup(|app| {
            // 仅在开发调试模式下启用日志插件
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }
            Ok(())
        })
        // `tauri::generate_context!()` 宏：在编译时读取 `tauri.conf.json` 配置文件，
        // 生成包含应用名称、窗口配置、安全策略等信息的上下文对象。
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
