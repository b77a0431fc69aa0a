//! Three-tier translation: dictionary lookup, then the remote translation
//! API, then the language-model backend. Each tier is cheaper and more
//! reliable than the next; the chain never fails, it degrades to a message
//! listing the supported languages.

use reqwest::Client;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use crate::backend::RemoteBackend;
use crate::config::TranslationConfig;
use crate::language::{detect_language, LanguageCode};

struct DictionaryRow {
    en: &'static str,
    fr: &'static str,
    es: &'static str,
    de: &'static str,
    pt: &'static str,
    zh: &'static str,
    ja: &'static str,
    vi: &'static str,
}

impl DictionaryRow {
    fn value(&self, lang: LanguageCode) -> &'static str {
        match lang {
            LanguageCode::En => self.en,
            LanguageCode::Fr => self.fr,
            LanguageCode::Es => self.es,
            LanguageCode::De => self.de,
            LanguageCode::Pt => self.pt,
            LanguageCode::Zh => self.zh,
            LanguageCode::Ja => self.ja,
            LanguageCode::Vi => self.vi,
        }
    }
}

/// Canonical phrase table. Lookup is bidirectional: a phrase matching any
/// column of a row translates by reading that row's target column.
const DICTIONARY: &[DictionaryRow] = &[
    DictionaryRow { en: "Hello", fr: "Bonjour", es: "Hola", de: "Hallo", pt: "Olá", zh: "你好", ja: "こんにちは", vi: "Xin chào" },
    DictionaryRow { en: "Goodbye", fr: "Au revoir", es: "Adiós", de: "Auf Wiedersehen", pt: "Adeus", zh: "再见", ja: "さようなら", vi: "Tạm biệt" },
    DictionaryRow { en: "Thank you", fr: "Merci", es: "Gracias", de: "Danke", pt: "Obrigado", zh: "谢谢", ja: "ありがとう", vi: "Cảm ơn" },
    DictionaryRow { en: "Please", fr: "S'il vous plaît", es: "Por favor", de: "Bitte", pt: "Por favor", zh: "请", ja: "お願いします", vi: "Làm ơn" },
    DictionaryRow { en: "Good morning", fr: "Bonjour", es: "Buenos días", de: "Guten Morgen", pt: "Bom dia", zh: "早上好", ja: "おはようございます", vi: "Chào buổi sáng" },
    DictionaryRow { en: "Good night", fr: "Bonne nuit", es: "Buenas noches", de: "Gute Nacht", pt: "Boa noite", zh: "晚安", ja: "おやすみなさい", vi: "Chúc ngủ ngon" },
    DictionaryRow { en: "How are you?", fr: "Comment allez-vous ?", es: "¿Cómo estás?", de: "Wie geht es dir?", pt: "Como vai?", zh: "你好吗？", ja: "お元気ですか？", vi: "Bạn khỏe không?" },
    DictionaryRow { en: "Yes", fr: "Oui", es: "Sí", de: "Ja", pt: "Sim", zh: "是", ja: "はい", vi: "Vâng" },
    DictionaryRow { en: "No", fr: "Non", es: "No", de: "Nein", pt: "Não", zh: "不", ja: "いいえ", vi: "Không" },
    DictionaryRow { en: "Welcome", fr: "Bienvenue", es: "Bienvenido", de: "Willkommen", pt: "Bem-vindo", zh: "欢迎", ja: "ようこそ", vi: "Chào mừng" },
    DictionaryRow { en: "See you later", fr: "À plus tard", es: "Hasta luego", de: "Bis später", pt: "Até logo", zh: "回头见", ja: "またね", vi: "Hẹn gặp lại" },
    DictionaryRow { en: "Sorry", fr: "Désolé", es: "Lo siento", de: "Entschuldigung", pt: "Desculpe", zh: "对不起", ja: "ごめんなさい", vi: "Xin lỗi" },
];

/// Tier 1: exact, case-insensitive, bidirectional table lookup. Linear scan
/// over rows and columns; the table is small and fixed.
pub fn dictionary_lookup(phrase: &str, target: LanguageCode) -> Option<String> {
    let needle = phrase.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    DICTIONARY
        .iter()
        .find(|row| {
            LanguageCode::ALL
                .iter()
                .any(|lang| row.value(*lang).to_lowercase() == needle)
        })
        .map(|row| row.value(target).to_string())
}

/// A tier-2 result that is empty or just echoes the input means the API had
/// nothing to offer; treated as unavailable.
fn usable_translation(input: &str, output: &str) -> bool {
    let output = output.trim();
    !output.is_empty() && output.to_lowercase() != input.trim().to_lowercase()
}

pub fn supported_languages_message() -> String {
    let names: Vec<&str> = LanguageCode::ALL.iter().map(|l| l.display_name()).collect();
    format!(
        "I can translate common phrases between {} and {}. Try a shorter phrase, for example \"translate hello to french\".",
        names[..names.len() - 1].join(", "),
        names[names.len() - 1]
    )
}

/// Tier 2: remote translation API client.
pub struct TranslationApi {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    budget: Duration,
}

impl TranslationApi {
    pub fn new(config: &TranslationConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(2))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            budget: Duration::from_secs(config.api_timeout_secs),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn request(&self, text: &str, target: LanguageCode) -> anyhow::Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("no translation API key configured"))?;

        let body = json!({
            "text": text,
            "target_lang": target.code().to_uppercase(),
            "source_lang": detect_language(text).code().to_uppercase(),
        });

        let call = async {
            let response = self
                .client
                .post(&self.endpoint)
                .header("Authorization", format!("Bearer {}", api_key))
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                anyhow::bail!("translation API returned HTTP {}", status);
            }

            // The response shape is consumed permissively: the documented
            // form is {"translations":[{"text":...}]}, but some deployments
            // flatten it.
            let value: serde_json::Value = response.json().await?;
            let translated = value["translations"][0]["text"]
                .as_str()
                .or_else(|| value["translation"].as_str())
                .or_else(|| value["translatedText"].as_str())
                .ok_or_else(|| anyhow::anyhow!("translation API response had no text"))?;
            Ok(translated.to_string())
        };

        tokio::time::timeout(self.budget, call)
            .await
            .map_err(|_| anyhow::anyhow!("translation API timed out after {:?}", self.budget))?
    }
}

/// The full chain. Infallible by contract.
pub struct TranslationChain {
    api: TranslationApi,
    backend: Arc<RemoteBackend>,
    model_budget: Duration,
}

impl TranslationChain {
    pub fn new(
        config: &TranslationConfig,
        backend: Arc<RemoteBackend>,
        model_budget: Duration,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            api: TranslationApi::new(config)?,
            backend,
            model_budget,
        })
    }

    pub async fn translate_phrase(&self, phrase: &str, target: LanguageCode) -> String {
        match self.try_translate(phrase, target).await {
            Some(text) => text,
            None => supported_languages_message(),
        }
    }

    /// Run the three tiers without the terminal message, so callers can tell
    /// a real translation from a degraded reply.
    pub async fn try_translate(&self, phrase: &str, target: LanguageCode) -> Option<String> {
        if let Some(hit) = dictionary_lookup(phrase, target) {
            tracing::debug!(target = %target.code(), "Translation served from dictionary");
            return Some(hit);
        }

        if self.api.is_configured() {
            match self.api.request(phrase, target).await {
                Ok(text) if usable_translation(phrase, &text) => {
                    tracing::debug!(target = %target.code(), "Translation served from API");
                    return Some(text);
                }
                Ok(_) => tracing::debug!("Translation API returned a no-op, trying model tier"),
                Err(e) => tracing::debug!(error = %e, "Translation API unavailable"),
            }
        }

        if self.backend.has_key() {
            match self.backend.translate(phrase, target, self.model_budget).await {
                Ok(text) if !text.trim().is_empty() => {
                    tracing::debug!(target = %target.code(), "Translation served from model");
                    return Some(text);
                }
                Ok(_) => {}
                Err(e) => tracing::debug!(error = %e, "Model tier unavailable"),
            }
        }

        None
    }
}
