use crate::cli::{CleanArgs, Preset};
use crate::error::{CliError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use strucfile::core::io::convert::ObabelConverter;
use strucfile::engine::config::{PipelineConfig, PipelineConfigBuilder};
use strucfile::engine::passes::Stage;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialPipelineConfig {
    preset: Option<Preset>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialOutputConfig {
    dna: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialConvertConfig {
    enabled: Option<bool>,
    #[serde(rename = "obabel-path")]
    obabel_path: Option<PathBuf>,
}

/// The `clean` configuration as read from a TOML file; every key is optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialCleanConfig {
    pipeline: Option<PartialPipelineConfig>,
    /// One switch per stage, keyed by the stage's kebab-case name.
    passes: Option<BTreeMap<Stage, bool>>,
    output: Option<PartialOutputConfig>,
    convert: Option<PartialConvertConfig>,
}

/// Everything the `clean` command needs once file and command line are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanSettings {
    pub pipeline: PipelineConfig,
    /// `None` when mol2 conversion is switched off.
    pub converter: Option<ObabelConverter>,
}

impl PartialCleanConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Merges the file with the command line. Precedence, lowest first: the preset, the
    /// `[passes]` table, `[output] dna`, then `--dna`, `--enable` and `--disable`.
    /// `-S` values are applied to the file values before anything else.
    pub fn merge_with_cli(mut self, args: &CleanArgs) -> Result<CleanSettings> {
        self.apply_set_values(&args.set_values)?;

        let pipeline_config = self.pipeline.take().unwrap_or_default();
        let output_config = self.output.take().unwrap_or_default();
        let convert_config = self.convert.take().unwrap_or_default();

        let preset = args
            .preset
            .or(pipeline_config.preset)
            .unwrap_or(Preset::RnaCleanup);
        let mut builder = PipelineConfigBuilder::from_config(preset_config(preset));

        for (stage, enabled) in self.passes.take().unwrap_or_default() {
            builder = builder.stage(stage, enabled);
        }
        if let Some(dna) = output_config.dna {
            builder = builder.convert_to_dna(dna);
        }
        if args.dna {
            builder = builder.convert_to_dna(true);
        }
        for &stage in &args.enable {
            builder = builder.stage(stage, true);
        }
        for &stage in &args.disable {
            builder = builder.stage(stage, false);
        }

        let convert = !args.no_convert && convert_config.enabled.unwrap_or(true);
        let converter = convert.then(|| {
            args.obabel
                .clone()
                .or(convert_config.obabel_path)
                .map(ObabelConverter::with_program)
                .unwrap_or_default()
        });

        Ok(CleanSettings {
            pipeline: builder.build(),
            converter,
        })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value_str) = kv_pair.split_once('=').ok_or_else(|| {
                CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                ))
            })?;

            match key {
                "pipeline.preset" => {
                    let preset = <Preset as clap::ValueEnum>::from_str(value_str, true).map_err(
                        |e| CliError::Config(format!("Invalid preset '{}': {}", value_str, e)),
                    )?;
                    self.pipeline.get_or_insert_with(Default::default).preset = Some(preset);
                }
                "output.dna" => {
                    self.output.get_or_insert_with(Default::default).dna =
                        Some(parse_bool(key, value_str)?);
                }
                "convert.enabled" => {
                    self.convert.get_or_insert_with(Default::default).enabled =
                        Some(parse_bool(key, value_str)?);
                }
                "convert.obabel-path" => {
                    self.convert.get_or_insert_with(Default::default).obabel_path =
                        Some(PathBuf::from(value_str));
                }
                _ => {
                    let stage = key
                        .strip_prefix("passes.")
                        .and_then(|name| name.parse::<Stage>().ok())
                        .ok_or_else(|| {
                            CliError::Config(format!(
                                "Unsupported configuration key for --set: '{}'",
                                key
                            ))
                        })?;
                    self.passes
                        .get_or_insert_with(Default::default)
                        .insert(stage, parse_bool(key, value_str)?);
                }
            }
        }
        Ok(())
    }
}

fn preset_config(preset: Preset) -> PipelineConfig {
    match preset {
        Preset::None => PipelineConfig::none(),
        Preset::RnaCleanup => PipelineConfig::rna_cleanup(),
        Preset::DnaCleanup => PipelineConfig::dna_cleanup(),
    }
}

fn parse_bool(key: &str, value_str: &str) -> Result<bool> {
    value_str
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid boolean value for {}: {}", key, value_str)))
}
