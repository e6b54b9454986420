//! src/configuration.rs
use serde_aux::field_attributes::deserialize_number_from_string;
use std::num::NonZeroUsize;
use std::path::PathBuf;

pub const USAGE: &str =
    "Usage: sentiment-topk [<input> <stopwords> <intermediate_output> <final_output> [top_k]]";

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub pipeline: PipelineSettings,
    pub cluster: ClusterSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct PipelineSettings {
    pub input_path: PathBuf,
    pub stopwords_path: PathBuf,
    pub intermediate_path: PathBuf,
    pub output_path: PathBuf,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub top_k: NonZeroUsize,
    pub header: String,
    pub combine: bool,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub partitions: NonZeroUsize,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub split_size_in_bytes: u64,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ClusterSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub workers: NonZeroUsize,
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    get_configuration_with_args(&[])
}

/// Layers built-in defaults, `configuration/base.yaml`, `SENTIMENT_*`
/// environment variables and finally positional arguments.
pub fn get_configuration_with_args(args: &[String]) -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {e}"))
    })?;
    let config_dir = base_path.join("configuration");

    let builder = config::Config::builder()
        .set_default("pipeline.input_path", "input/stock_data.csv")?
        .set_default("pipeline.stopwords_path", "input/stop-word-list.txt")?
        .set_default("pipeline.intermediate_path", "output/intermediate")?
        .set_default("pipeline.output_path", "output/final")?
        .set_default("pipeline.top_k", 100_i64)?
        .set_default("pipeline.header", crate::record::DEFAULT_HEADER)?
        .set_default("pipeline.combine", true)?
        .set_default("pipeline.partitions", 1_i64)?
        .set_default("pipeline.split_size_in_bytes", 16_i64 * 1024 * 1024)?
        .set_default("cluster.workers", 4_i64)?
        .add_source(config::File::from(config_dir.join("base.yaml")).required(false))
        .add_source(
            config::Environment::with_prefix("SENTIMENT")
                .prefix_separator("_")
                .separator("__"),
        );

    let builder = match args {
        [] => builder,
        [input, stopwords, intermediate, output, rest @ ..] if rest.len() <= 1 => builder
            .set_override("pipeline.input_path", input.as_str())?
            .set_override("pipeline.stopwords_path", stopwords.as_str())?
            .set_override("pipeline.intermediate_path", intermediate.as_str())?
            .set_override("pipeline.output_path", output.as_str())?
            .set_override_option("pipeline.top_k", rest.first().map(String::as_str))?,
        _ => return Err(config::ConfigError::Message(USAGE.to_string())),
    };

    builder.build()?.try_deserialize::<Settings>()
}
