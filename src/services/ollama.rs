//! # Ollama 生成客户端
//!
//! 封装对本地 Ollama 服务的三个 HTTP JSON 调用：
//! - `list_models` - `GET /api/tags`，获取已安装模型名称列表
//! - `show_model` - `POST /api/show`，获取模型元数据（上下文长度）
//! - `generate` - `POST /api/generate`，提交提示词并取回生成文本
//!
//! ## 预检机制
//! `generate` 在发起生成请求之前，先获取模型元数据并用
//! `ceil(字符数 / 4)` 的启发式估算输入 token 数；估算值达到上下文上限时
//! 直接返回 `InputTooLarge`，不再发起生成调用。该检查是提前拦截性质的
//! 启发式判断，允许误报/漏报，最终裁决权在服务端。
//!
//! ## 无状态设计
//! 客户端仅持有基础地址和 reqwest 连接句柄，三个操作除网络调用外
//! 无任何副作用；不做重试、不设自定义超时（沿用传输层默认行为）、
//! 不缓存模型元数据。

use crate::models::ollama::{
    GenerateRequest, GenerateResponse, ModelListResponse, ModelMetadata, ShowRequest,
    ShowResponse,
};
use crate::utils::error::ProcessError;

/// Ollama 生成客户端
///
/// 除配置的基础地址外不持有任何状态，可随用随建。
pub struct OllamaClient {
    /// Ollama 服务基础地址（如 `http://localhost:11434`），不含尾部斜杠
    base_url: String,

    /// reqwest 客户端句柄：内部持有连接池，同一次工作流的
    /// 元数据请求和生成请求可复用连接
    http: reqwest::Client,
}

impl OllamaClient {
    /// 创建客户端
    ///
    /// # 参数
    /// - `base_url` - 服务基础地址，尾部斜杠会被去除以便拼接路径
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// 获取已安装的模型名称列表
    ///
    /// 调用 `GET {base}/api/tags`，提取每个条目的 `name` 字段。
    /// 设置面板用返回值渲染模型下拉列表；调用失败时前端降级为
    /// 自由文本输入框，不阻塞设置面板。
    ///
    /// # 错误
    /// 网络传输失败或返回非成功状态码时返回 `ServiceUnavailable`。
    pub async fn list_models(&self) -> Result<Vec<String>, ProcessError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ProcessError::ServiceUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ProcessError::ServiceUnavailable(format!(
                "模型列表接口返回 HTTP {}",
                response.status()
            )));
        }

        let parsed: ModelListResponse = response
            .json()
            .await
            .map_err(|e| ProcessError::ServiceUnavailable(format!("解析模型列表失败: {}", e)))?;

        Ok(parsed.models.into_iter().map(|m| m.name).collect())
    }

    /// 获取指定模型的元数据
    ///
    /// 调用 `POST {base}/api/show`，从响应的 `parameters.context_length`
    /// 读取上下文长度上限。
    ///
    /// # 参数
    /// - `model_name` - 模型名称（含 tag）
    ///
    /// # 错误
    /// 网络传输失败或返回非成功状态码时返回 `ServiceUnavailable`。
    pub async fn show_model(&self, model_name: &str) -> Result<ModelMetadata, ProcessError> {
        let url = format!("{}/api/show", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&ShowRequest { name: model_name })
            .send()
            .await
            .map_err(|e| ProcessError::ServiceUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ProcessError::ServiceUnavailable(format!(
                "模型元数据接口返回 HTTP {}",
                response.status()
            )));
        }

        let parsed: ShowResponse = response
            .json()
            .await
            .map_err(|e| ProcessError::ServiceUnavailable(format!("解析模型元数据失败: {}", e)))?;

        Ok(ModelMetadata {
            context_length: parsed.parameters.context_length,
        })
    }

    /// 提交提示词并取回生成文本
    ///
    /// 执行顺序：
    /// 1. 获取模型元数据，读取上下文长度上限
    /// 2. 估算提示词 + 系统指令的总 token 数（`ceil(总字符数 / 4)`）
    /// 3. 估算值达到上限 → 返回 `InputTooLarge`，不发起生成调用
    /// 4. 调用 `POST {base}/api/generate`（`stream: false`），返回响应的
    ///    `response` 字段
    ///
    /// # 参数
    /// - `model_name` - 模型名称
    /// - `prompt_text` - 完整提示词文本（模板正文 + 包裹后的笔记原文）
    /// - `system_instruction` - 系统指令（可选）
    ///
    /// # 错误
    /// - `InputTooLarge` - 预检估算超限
    /// - `ServiceUnavailable` - 任一请求的传输失败或非成功状态码
    pub async fn generate(
        &self,
        model_name: &str,
        prompt_text: &str,
        system_instruction: Option<&str>,
    ) -> Result<String, ProcessError> {
        // ---- 预检：估算 token 数并与模型上下文上限比较 ----
        let metadata = self.show_model(model_name).await?;
        let total_chars = prompt_text.chars().count()
            + system_instruction.map_or(0, |s| s.chars().count());
        let estimated = tokens_for_char_count(total_chars);

        // 上下文长度为 0 表示服务端未报告上限，跳过拦截
        if metadata.context_length > 0 && estimated >= metadata.context_length {
            return Err(ProcessError::InputTooLarge {
                estimated,
                limit: metadata.context_length,
            });
        }

        // ---- 生成调用 ----
        let url = format!("{}/api/generate", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&GenerateRequest {
                model: model_name,
                prompt: prompt_text,
                system: system_instruction,
                stream: false,
            })
            .send()
            .await
            .map_err(|e| ProcessError::ServiceUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ProcessError::ServiceUnavailable(format!(
                "生成接口返回 HTTP {}",
                response.status()
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ProcessError::ServiceUnavailable(format!("解析生成响应失败: {}", e)))?;

        Ok(parsed.response)
    }
}

/// 估算文本的 token 数
///
/// 使用固定启发式 `ceil(字符数 / 4)`，按 Unicode 字符（而非字节）计数。
///
/// # 参数
/// - `text` - 待估算的文本
///
/// # 返回值
/// 估算的 token 数
pub fn estimate_token_count(text: &str) -> u64 {
    tokens_for_char_count(text.chars().count())
}

/// 按字符数计算 token 估算值（`ceil(count / 4)`）
///
/// 拆出独立函数是因为预检需要对「提示词 + 系统指令」的合并字符数
/// 做一次向上取整，而不是对两段文本分别取整后相加。
fn tokens_for_char_count(count: usize) -> u64 {
    ((count as u64) + 3) / 4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_token_count_exact_multiple() {
        // 8 个字符 → ceil(8/4) = 2
        assert_eq!(estimate_token_count("abcdefgh"), 2);
    }

    #[test]
    fn test_estimate_token_count_rounds_up() {
        assert_eq!(estimate_token_count(""), 0);
        assert_eq!(estimate_token_count("a"), 1);
        assert_eq!(estimate_token_count("abcde"), 2);
    }

    #[test]
    fn test_estimate_token_count_uses_chars_not_bytes() {
        // 4 个汉字 = 12 字节，但按字符计数应为 ceil(4/4) = 1
        assert_eq!(estimate_token_count("笔记助手"), 1);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = OllamaClient::new("http://localhost:11434/");
        assert_eq!(client.base_url, "http://localhost:11434");
    }

    #[tokio::test]
    async fn test_list_models_unreachable_service() {
        // 本机保留端口，连接必然被拒绝（立即失败，不依赖外网超时行为）
        let client = OllamaClient::new("http://127.0.0.1:9");
        let err = client.list_models().await.expect_err("不可达地址应报错");
        assert!(matches!(err, ProcessError::ServiceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_generate_rejects_oversized_input_before_generate_call() {
        use std::io::{Read, Write};

        // 一次性本地服务：只应答元数据请求，应答后监听器随线程退出关闭。
        // 若预检未拦截、客户端继续调用生成接口，连接会被拒绝并产生
        // ServiceUnavailable，而非下方断言的 InputTooLarge。
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("应能绑定本机端口");
        let addr = listener.local_addr().expect("应能取得监听地址");
        let server = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("应能接受连接");
            let mut raw = Vec::new();
            let mut buf = [0u8; 1024];
            // 读完整个请求（请求头 + Content-Length 指定的请求体）再应答
            loop {
                let n = stream.read(&mut buf).expect("应能读取请求");
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw).to_ascii_lowercase();
                if let Some(pos) = text.find("\r\n\r\n") {
                    let body_len = text
                        .lines()
                        .find_map(|l| l.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if raw.len() >= pos + 4 + body_len {
                        break;
                    }
                }
            }
            let body = r#"{ "parameters": { "context_length": 2 } }"#;
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).expect("应能写入响应");
            // 返回请求行，供断言确认服务到的是元数据接口
            String::from_utf8_lossy(&raw)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string()
        });

        let client = OllamaClient::new(&format!("http://{}", addr));
        // 40 个字符 → 估算 ceil(40/4) = 10 token，达到上限 2，应被拦截
        let err = client
            .generate("llama3.1", &"a".repeat(40), None)
            .await
            .expect_err("超限输入应被拦截");
        assert!(matches!(
            err,
            ProcessError::InputTooLarge {
                estimated: 10,
                limit: 2
            }
        ));

        // 唯一一次被服务的请求是元数据查询，生成接口没有收到任何请求
        let request_line = server.join().expect("服务线程应正常结束");
        assert!(request_line.contains("/api/show"));
    }

    #[tokio::test]
    async fn test_generate_unreachable_service() {
        // 元数据预检请求先失败，整个生成流程以 ServiceUnavailable 结束
        let client = OllamaClient::new("http://127.0.0.1:9");
        let err = client
            .generate("llama3.1", "整理以下内容", None)
            .await
            .expect_err("不可达地址应报错");
        assert!(matches!(err, ProcessError::ServiceUnavailable(_)));
    }
}
