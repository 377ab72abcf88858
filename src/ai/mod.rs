//! OpenRouter analysis client
//!
//! Wraps the hosted chat-completions endpoint behind two operations: the
//! sales-performance analysis and the feature-scoped dashboard assistant.
//! The spreadsheet pipeline never calls this module; the CLI wires them
//! together and hands the returned narrative to the exporter.

use crate::error::{SellersolError, SellersolResult};
use crate::types::RowRecord;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "arcee-ai/trinity-large-preview:free";

/// Rows included in an analysis request. Keeps prompt token usage bounded.
pub const SAMPLE_LIMIT: usize = 50;

const ANALYST_PROMPT: &str = "Kamu adalah analis bisnis ahli. Analisa data penjualan JSON \
berikut. Berikan ringkasan performa, tren penjualan, dan rekomendasi singkat dalam format \
HTML (gunakan tag <p>, <ul>, <li>, <strong>). Bahasa: Indonesia.";

const ASSISTANT_PROMPT: &str = "Kamu adalah 'SellerSol Assistant', asisten khusus untuk \
aplikasi dashboard SellerSol. Jawablah HANYA berdasarkan fitur nyata yang ada di aplikasi \
saat ini.\n\n\
FITUR APLIKASI SELLERSOL:\n\
1. Analisis Cerdas (Performa Toko): user mengunggah file Excel (.xlsx/.xls) pesanan \
marketplace, memilih platform (Shopee, Tokopedia, atau Tiktok Shop), lalu AI memberikan \
ringkasan performa, tren, dan rekomendasi. Hasilnya bisa diekspor sebagai laporan Excel.\n\
2. Contoh Data: tersedia file dummy .xlsx untuk mencoba format data.\n\
3. Riwayat: hasil analisa tersimpan dan dapat dihapus oleh user.\n\n\
ATURAN KETAT:\n\
- DILARANG menyebutkan platform selain Shopee, Tokopedia, dan Tiktok Shop.\n\
- Jika user bertanya di luar fitur di atas, katakan: \"Maaf, sebagai asisten SellerSol, \
saya hanya dapat membantu Anda terkait penggunaan fitur analisis performa dan informasi \
marketplace yang tersedia di platform ini.\"\n\n\
FORMATTING: gunakan Markdown, Bold untuk istilah penting, dan beri jarak antar paragraf.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

/// Bound the analysis sample to the first [`SAMPLE_LIMIT`] rows and render
/// them as a JSON array of objects.
pub fn sample_json(rows: &[RowRecord]) -> SellersolResult<String> {
    let bounded = &rows[..rows.len().min(SAMPLE_LIMIT)];
    Ok(serde_json::to_string(bounded)?)
}

pub struct AnalysisClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl AnalysisClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Ask the analyst model for an HTML-flavored narrative about the rows.
    pub async fn analyze(&self, rows: &[RowRecord], platform: &str) -> SellersolResult<String> {
        let sample = sample_json(rows)?;
        let messages = vec![
            ChatMessage::system(ANALYST_PROMPT),
            ChatMessage::user(format!(
                "Berikut adalah data penjualan toko dari platform {platform}: {sample}"
            )),
        ];
        self.complete(&messages).await
    }

    /// One assistant turn, scoped to the app's own features.
    pub async fn chat(&self, message: &str, history: &[ChatMessage]) -> SellersolResult<String> {
        let mut messages = vec![ChatMessage::system(ASSISTANT_PROMPT)];
        messages.extend(history.iter().cloned());
        messages.push(ChatMessage::user(message));
        self.complete(&messages).await
    }

    async fn complete(&self, messages: &[ChatMessage]) -> SellersolResult<String> {
        let request = ChatRequest {
            model: &self.model,
            messages,
        };

        tracing::debug!(model = %self.model, messages = messages.len(), "sending chat completion request");
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SellersolError::Analysis(e.to_string()))?;
        tracing::debug!(status = %response.status(), "chat completion response");

        if !response.status().is_success() {
            return Err(SellersolError::Analysis(format!(
                "analysis endpoint returned {}",
                response.status()
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| SellersolError::Analysis(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| SellersolError::Analysis("analysis endpoint returned no choices".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellValue;
    use pretty_assertions::assert_eq;

    fn rows(n: usize) -> Vec<RowRecord> {
        (0..n)
            .map(|i| {
                let mut row = RowRecord::new();
                row.push("Produk", CellValue::Text(format!("P{i}")));
                row.push("Total", CellValue::Number(i as f64));
                row
            })
            .collect()
    }

    #[test]
    fn test_sample_json_is_bounded() {
        let json = sample_json(&rows(80)).unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), SAMPLE_LIMIT);
        assert_eq!(parsed[0]["Produk"], "P0");
    }

    #[test]
    fn test_sample_json_keeps_short_inputs_whole() {
        let json = sample_json(&rows(3)).unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 3);
    }

    #[test]
    fn test_chat_message_constructors() {
        assert_eq!(ChatMessage::system("a").role, "system");
        assert_eq!(ChatMessage::user("b").role, "user");
        assert_eq!(ChatMessage::assistant("c").role, "assistant");
    }

    #[test]
    fn test_chat_request_serializes_expected_shape() {
        let messages = vec![ChatMessage::user("halo")];
        let request = ChatRequest {
            model: DEFAULT_MODEL,
            messages: &messages,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], DEFAULT_MODEL);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "halo");
    }
}
