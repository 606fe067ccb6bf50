//! Gemini プロバイダの実装（Files API + generateContent）

use crate::compliance::document::{ArtifactHandle, DocumentBuffer};
use crate::domain::{ApiKey, ModelName};
use crate::error::Error;
use crate::llm::provider::LlmProvider;
use reqwest::blocking::{Client, Response};
use serde_json::{json, Value};

/// 既定のモデル
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// 既定の API ベース URL
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini プロバイダ
pub struct GeminiProvider {
    model: String,
    api_key: Option<ApiKey>,
    base_url: String,
    temperature: Option<f32>,
    client: Client,
}

impl GeminiProvider {
    /// 新しいGeminiプロバイダを作成
    ///
    /// # Arguments
    /// * `model` - モデル名（デフォルト: "gemini-3-flash-preview"）
    /// * `api_key` - API キー。None のままでも作成はできるが、リモート呼び出しは Configuration エラーになる
    /// * `base_url` - API のベース URL（デフォルト: generativelanguage.googleapis.com）
    pub fn new(model: Option<ModelName>, api_key: Option<ApiKey>, base_url: Option<String>) -> Self {
        let model = model
            .map(|m| m.to_string())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = base_url
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            model,
            api_key,
            base_url,
            temperature: None,
            client: Client::new(),
        }
    }

    /// 生成時の温度を指定する
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    fn api_key(&self) -> Result<&ApiKey, Error> {
        self.api_key.as_ref().ok_or_else(|| {
            Error::configuration("Gemini API key is not configured (set GEMINI_API_KEY)")
        })
    }

    /// resumable upload の開始リクエストに載せるメタデータ
    fn make_upload_metadata(document: &DocumentBuffer) -> Value {
        json!({
            "file": {
                "display_name": document.display_name()
            }
        })
    }

    /// generateContent のリクエストペイロードを生成
    ///
    /// ファイルを先に、プロンプトを最後に 1 つの user ターンへ並べる。
    pub fn make_request_payload(&self, files: &[&ArtifactHandle], prompt: &str) -> Value {
        let mut parts: Vec<Value> = files
            .iter()
            .map(|f| {
                json!({
                    "file_data": {
                        "mime_type": f.mime_type,
                        "file_uri": f.uri
                    }
                })
            })
            .collect();
        parts.push(json!({ "text": prompt }));

        let mut payload = json!({
            "contents": [{
                "role": "user",
                "parts": parts
            }]
        });
        if let Some(t) = self.temperature {
            payload["generationConfig"] = json!({ "temperature": t });
        }
        payload
    }

    /// アップロード完了レスポンスから ArtifactHandle を作る
    fn parse_uploaded_file(
        response_json: &str,
        document: &DocumentBuffer,
    ) -> Result<ArtifactHandle, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::upload(format!("Failed to parse upload response JSON: {}", e)))?;
        let file = &v["file"];
        let uri = file["uri"]
            .as_str()
            .ok_or_else(|| Error::upload("Upload response has no file uri"))?;
        let name = file["name"].as_str().unwrap_or(uri);
        let mime_type = file["mimeType"].as_str().unwrap_or(document.mime_type());
        let display_name = file["displayName"]
            .as_str()
            .unwrap_or(document.display_name());
        Ok(ArtifactHandle::new(name, uri, mime_type, display_name))
    }

    /// generateContent のレスポンスからテキストを抽出
    ///
    /// 最初の候補の text part をすべて連結する。text が 1 つも無ければ None。
    pub fn parse_response_text(response_json: &str) -> Result<Option<String>, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::generation(format!("Failed to parse response JSON: {}", e)))?;

        if let Some(error) = v.get("error") {
            let error_msg = error["message"].as_str().unwrap_or("Unknown error");
            return Err(Error::generation(format!("Gemini API error: {}", error_msg)));
        }

        let texts: Vec<&str> = v["candidates"][0]["content"]["parts"]
            .as_array()
            .map(|parts| parts.iter().filter_map(|part| part["text"].as_str()).collect())
            .unwrap_or_default();
        if texts.is_empty() {
            return Ok(None);
        }
        Ok(Some(texts.concat()))
    }

    /// テキストが無い応答の理由（ブロック・終了理由）をメッセージにする
    fn describe_empty_response(response_json: &str) -> String {
        let v: Value = serde_json::from_str(response_json).unwrap_or(Value::Null);
        if let Some(reason) = v["promptFeedback"]["blockReason"].as_str() {
            return format!("No text in response (blockReason: {})", reason);
        }
        if let Some(reason) = v["candidates"][0]["finishReason"].as_str() {
            return format!("No text in response (finishReason: {})", reason);
        }
        "No text in response".to_string()
    }
}

/// レスポンス本文を読み、非 2xx なら API のエラーメッセージを取り出して `on_error` で包む
fn read_success_body(response: Response, on_error: fn(String) -> Error) -> Result<String, Error> {
    let status = response.status();
    let response_text = response
        .text()
        .map_err(|e| on_error(format!("Failed to read response: {}", e)))?;
    if !status.is_success() {
        return Err(on_error(format!(
            "Gemini API error: {}",
            extract_error_message(status.as_u16(), &response_text)
        )));
    }
    Ok(response_text)
}

/// エラーレスポンスを解析してメッセージを抽出
fn extract_error_message(status: u16, response_text: &str) -> String {
    serde_json::from_str::<Value>(response_text)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(|s| s.to_string()))
        .unwrap_or_else(|| format!("HTTP {}: {}", status, response_text))
}

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn check_ready(&self) -> Result<(), Error> {
        self.api_key().map(|_| ())
    }

    fn upload_file(&self, document: &DocumentBuffer) -> Result<ArtifactHandle, Error> {
        let api_key = self.api_key()?;

        // 1) resumable upload セッションを開始し、アップロード先 URL を受け取る
        let start_url = format!("{}/upload/v1beta/files", self.base_url);
        let response = self
            .client
            .post(&start_url)
            .header("x-goog-api-key", api_key.expose())
            .header("X-Goog-Upload-Protocol", "resumable")
            .header("X-Goog-Upload-Command", "start")
            .header("X-Goog-Upload-Header-Content-Length", document.len().to_string())
            .header("X-Goog-Upload-Header-Content-Type", document.mime_type())
            .json(&Self::make_upload_metadata(document))
            .send()
            .map_err(|e| Error::upload(format!("HTTP request failed: {}", e)))?;
        let upload_url = response
            .headers()
            .get("x-goog-upload-url")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        read_success_body(response, Error::Upload)?;
        let upload_url =
            upload_url.ok_or_else(|| Error::upload("Gemini API did not return an upload URL"))?;

        // 2) バイト列を送って確定する
        let response = self
            .client
            .post(&upload_url)
            .header("X-Goog-Upload-Offset", "0")
            .header("X-Goog-Upload-Command", "upload, finalize")
            .body(document.bytes().to_vec())
            .send()
            .map_err(|e| Error::upload(format!("HTTP request failed: {}", e)))?;
        let response_text = read_success_body(response, Error::Upload)?;

        Self::parse_uploaded_file(&response_text, document)
    }

    fn generate_content(&self, files: &[&ArtifactHandle], prompt: &str) -> Result<String, Error> {
        let api_key = self.api_key()?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let payload = self.make_request_payload(files, prompt);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key.expose())
            .json(&payload)
            .send()
            .map_err(|e| Error::generation(format!("HTTP request failed: {}", e)))?;
        let response_text = read_success_body(response, Error::Generation)?;

        Self::parse_response_text(&response_text)?
            .ok_or_else(|| Error::generation(Self::describe_empty_response(&response_text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> GeminiProvider {
        GeminiProvider::new(None, Some(ApiKey::new("test-key")), None)
    }

    fn handle(name: &str) -> ArtifactHandle {
        ArtifactHandle::new(
            format!("files/{}", name),
            format!("https://generativelanguage.googleapis.com/v1beta/files/{}", name),
            "application/pdf",
            name,
        )
    }

    #[test]
    fn test_defaults() {
        let p = provider();
        assert_eq!(p.name(), "gemini");
        assert_eq!(p.model(), "gemini-3-flash-preview");
        assert_eq!(p.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let p = GeminiProvider::new(
            Some(ModelName::new("gemini-2.0")),
            None,
            Some("http://localhost:8080/".to_string()),
        );
        assert_eq!(p.base_url, "http://localhost:8080");
        assert_eq!(p.model(), "gemini-2.0");
    }

    #[test]
    fn test_missing_api_key_fails_before_any_request() {
        // base_url は到達不能なアドレス。Configuration が返る＝リクエストを組み立てる前に止まっている
        let p = GeminiProvider::new(None, None, Some("http://127.0.0.1:9".to_string()));
        assert!(matches!(p.check_ready(), Err(Error::Configuration(_))));

        let doc = DocumentBuffer::pdf(b"%PDF-1.4", "SOP_Document");
        assert!(matches!(p.upload_file(&doc), Err(Error::Configuration(_))));

        let a = handle("a");
        assert!(matches!(
            p.generate_content(&[&a], "prompt"),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_make_request_payload_orders_files_before_prompt() {
        let p = provider();
        let sop = handle("sop");
        let policy = handle("policy");
        let payload = p.make_request_payload(&[&sop, &policy], "Compare these");

        let contents = payload["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0]["role"], "user");
        let parts = contents[0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0]["file_data"]["file_uri"], sop.uri.as_str());
        assert_eq!(parts[0]["file_data"]["mime_type"], "application/pdf");
        assert_eq!(parts[1]["file_data"]["file_uri"], policy.uri.as_str());
        assert_eq!(parts[2]["text"], "Compare these");
        assert!(payload.get("generationConfig").is_none());
    }

    #[test]
    fn test_make_request_payload_with_temperature() {
        let p = provider().with_temperature(Some(0.5));
        let payload = p.make_request_payload(&[], "x");
        assert_eq!(payload["generationConfig"]["temperature"], 0.5);
    }

    #[test]
    fn test_upload_metadata_carries_display_name() {
        let doc = DocumentBuffer::pdf(b"%PDF", "Policy_Document");
        let meta = GeminiProvider::make_upload_metadata(&doc);
        assert_eq!(meta["file"]["display_name"], "Policy_Document");
    }

    #[test]
    fn test_parse_uploaded_file() {
        let doc = DocumentBuffer::pdf(b"%PDF", "SOP_Document");
        let json = r#"{"file":{"name":"files/abc123","displayName":"SOP_Document","mimeType":"application/pdf","sizeBytes":"4","uri":"https://generativelanguage.googleapis.com/v1beta/files/abc123","state":"ACTIVE"}}"#;
        let h = GeminiProvider::parse_uploaded_file(json, &doc).unwrap();
        assert_eq!(h.name, "files/abc123");
        assert_eq!(h.uri, "https://generativelanguage.googleapis.com/v1beta/files/abc123");
        assert_eq!(h.mime_type, "application/pdf");
        assert_eq!(h.display_name, "SOP_Document");
    }

    #[test]
    fn test_parse_uploaded_file_without_uri_is_upload_error() {
        let doc = DocumentBuffer::pdf(b"%PDF", "SOP_Document");
        let r = GeminiProvider::parse_uploaded_file(r#"{"file":{"name":"files/x"}}"#, &doc);
        assert!(matches!(r, Err(Error::Upload(_))));
        let r = GeminiProvider::parse_uploaded_file("not json", &doc);
        assert!(matches!(r, Err(Error::Upload(_))));
    }

    #[test]
    fn test_parse_response_text_concatenates_parts() {
        let json = r###"{"candidates":[{"content":{"parts":[{"text":"## Executive"},{"text":" Summary"}],"role":"model"},"finishReason":"STOP"}]}"###;
        let text = GeminiProvider::parse_response_text(json).unwrap();
        assert_eq!(text.as_deref(), Some("## Executive Summary"));
    }

    #[test]
    fn test_parse_response_text_without_text() {
        let json = r#"{"candidates":[{"content":{"parts":[]},"finishReason":"SAFETY"}]}"#;
        assert_eq!(GeminiProvider::parse_response_text(json).unwrap(), None);
        assert_eq!(
            GeminiProvider::describe_empty_response(json),
            "No text in response (finishReason: SAFETY)"
        );

        let blocked = r#"{"promptFeedback":{"blockReason":"OTHER"}}"#;
        assert_eq!(GeminiProvider::parse_response_text(blocked).unwrap(), None);
        assert_eq!(
            GeminiProvider::describe_empty_response(blocked),
            "No text in response (blockReason: OTHER)"
        );
    }

    #[test]
    fn test_parse_response_text_error_object() {
        let json = r#"{"error":{"code":429,"message":"Resource has been exhausted"}}"#;
        let err = GeminiProvider::parse_response_text(json).unwrap_err();
        assert!(matches!(err, Error::Generation(ref m) if m.contains("Resource has been exhausted")));
    }

    #[test]
    fn test_parse_response_text_malformed() {
        let err = GeminiProvider::parse_response_text("<html>").unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
    }

    #[test]
    fn test_extract_error_message() {
        assert_eq!(
            extract_error_message(400, r#"{"error":{"message":"API key not valid"}}"#),
            "API key not valid"
        );
        assert_eq!(extract_error_message(502, "Bad Gateway"), "HTTP 502: Bad Gateway");
    }
}
