use std::env;

use anyhow::bail;

use crate::logger::Level;

pub struct Config {
    pub recognizer: Option<RecognizerConfig>,
    pub qna: Option<QnaConfig>,
    pub translator: Option<TranslatorConfig>,
    pub verbosity: Level,
}

impl Config {
    /// Whether any cloud collaborator was configured at all. A bot built
    /// without collaborators still starts, but every gateway call fails
    /// and the error boundary reminds the user to deploy the models.
    #[must_use]
    pub fn has_collaborators(&self) -> bool {
        self.recognizer.is_some() || self.qna.is_some() || self.translator.is_some()
    }
}

pub struct RecognizerConfig {
    pub app_id: String,
    pub key: String,
    pub host: String,
}

pub struct QnaConfig {
    pub knowledge_base_id: String,
    pub key: String,
    pub host: String,
}

pub struct TranslatorConfig {
    pub key: String,
    pub host: String,
}

const ENV_PREFIX: &str = "SWITCHBOARD__";

pub fn from_env() -> anyhow::Result<Config> {
    let recognizer = group(
        "recognizer",
        ["RECOGNIZER_APP_ID", "RECOGNIZER_KEY", "RECOGNIZER_HOST"],
        get_opt_env,
    )?
    .map(|[app_id, key, host]| RecognizerConfig { app_id, key, host });

    let qna = group("knowledge base", ["QNA_KB_ID", "QNA_KEY", "QNA_HOST"], get_opt_env)?.map(
        |[knowledge_base_id, key, host]| QnaConfig {
            knowledge_base_id,
            key,
            host,
        },
    );

    let translator = group("translator", ["TRANSLATOR_KEY", "TRANSLATOR_HOST"], get_opt_env)?
        .map(|[key, host]| TranslatorConfig { key, host });

    let verbosity = match get_opt_env("VERBOSITY").as_deref() {
        None | Some("info") => Level::Info,
        Some("debug") => Level::Debug,
        Some(other) => bail!("unsupported verbosity {other:?}, expected \"info\" or \"debug\""),
    };

    Ok(Config {
        recognizer,
        qna,
        translator,
        verbosity,
    })
}

/// A collaborator is either fully configured or left out; a half-filled
/// group means a typo in the environment, not a choice, and fails startup.
fn group<const N: usize>(
    name: &str,
    keys: [&str; N],
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Option<[String; N]>> {
    let values = keys.map(|key| lookup(key));
    if values.iter().all(Option::is_none) {
        return Ok(None);
    }
    if values.iter().all(Option::is_some) {
        return Ok(Some(values.map(|value| value.unwrap_or_default())));
    }
    let missing: Vec<String> = keys
        .iter()
        .zip(&values)
        .filter(|(_, value)| value.is_none())
        .map(|(key, _)| format!("{ENV_PREFIX}{key}"))
        .collect();
    bail!(
        "incomplete {name} configuration, missing {}",
        missing.join(", ")
    )
}

fn get_opt_env(key: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}{key}")).ok()
}
