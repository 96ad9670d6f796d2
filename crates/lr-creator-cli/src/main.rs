use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgMatches, Command};
use lr_creator::{
    try_stage_from_step_id, Artifact, CategoryTags, CreatorConfig, FormValues, NavigationInput,
    StepGraph, WizardStage,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// File stem used when the record has no display name yet
const UNTITLED_STEM: &str = "untitled";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lr_creator=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = build_cli().get_matches();
    let config_path = matches
        .subcommand()
        .and_then(|(_, args)| args.get_one::<PathBuf>("config"))
        .or_else(|| matches.get_one::<PathBuf>("config"));
    let config = load_config(config_path)?;

    match matches.subcommand() {
        Some(("steps", _)) => {
            let graph = StepGraph::build(&config);
            for step in graph.steps() {
                let stage = try_stage_from_step_id(step.id.as_str())?;
                println!("{:<28} {:<16} {}", step.id, describe_stage(stage), step.title);
            }
        }
        Some(("stage", args)) => {
            let id = required::<String>(args, "step-id")?;
            let stage = try_stage_from_step_id(id)
                .with_context(|| format!("cannot decode step id '{id}'"))?;
            println!("{}", describe_stage(stage));
        }
        Some(("walk", args)) => {
            let values = load_form(required::<PathBuf>(args, "form")?)?;
            let graph = StepGraph::build(&config);
            let path = graph
                .path(&NavigationInput::from_values(&values))
                .context("form does not reach the download step")?;
            for id in path {
                println!("{id}");
            }
        }
        Some(("render", args)) => {
            let values = load_form(required::<PathBuf>(args, "form")?)?;
            let tags = match args.get_one::<PathBuf>("tags") {
                Some(path) => load_tags(path)?,
                None => CategoryTags::new(),
            }
            .with_bundles(values.bundles());

            let projection = lr_creator::project_configured(&config, values.kind(), &values);
            for issue in &projection.issues {
                eprintln!("warning: {issue}");
            }

            let artifacts =
                lr_creator::generate_artifacts_with(&config, &projection.record, &tags)?;
            match args.get_one::<PathBuf>("out") {
                Some(dir) => {
                    for path in write_artifacts(dir, &artifacts)? {
                        println!("wrote {}", path.display());
                    }
                }
                None => {
                    for artifact in &artifacts {
                        println!("# {}", artifact.name);
                        print!("{}", artifact.content);
                    }
                }
            }
        }
        _ => {
            build_cli().print_help()?;
        }
    }

    Ok(())
}

fn build_cli() -> Command {
    let form_arg = || {
        Arg::new("form")
            .long("form")
            .required(true)
            .value_parser(value_parser!(PathBuf))
            .help("Form snapshot as YAML or JSON")
    };

    Command::new("lr-creator")
        .version(lr_creator::VERSION)
        .about("Learning resource creator: inspect the wizard and render artifacts")
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Creator configuration YAML"),
        )
        .subcommand(Command::new("steps").about("List every wizard step"))
        .subcommand(
            Command::new("stage")
                .about("Decode a step identifier into its stage")
                .arg(
                    Arg::new("step-id")
                        .required(true)
                        .help("Step identifier, e.g. step-task-detail-2"),
                ),
        )
        .subcommand(
            Command::new("walk")
                .about("Print the navigation path for a form snapshot")
                .arg(form_arg()),
        )
        .subcommand(
            Command::new("render")
                .about("Project a form snapshot and generate the artifacts")
                .arg(form_arg())
                .arg(
                    Arg::new("tags")
                        .long("tags")
                        .value_parser(value_parser!(PathBuf))
                        .help("Selected category tags as YAML"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .value_parser(value_parser!(PathBuf))
                        .help("Directory to write the artifacts into"),
                ),
        )
}

fn required<'a, T: Clone + Send + Sync + 'static>(args: &'a ArgMatches, name: &str) -> Result<&'a T> {
    match args.get_one::<T>(name) {
        Some(value) => Ok(value),
        None => bail!("missing argument '{name}'"),
    }
}

fn describe_stage(stage: WizardStage) -> String {
    match stage {
        WizardStage::Card => "card".to_string(),
        WizardStage::PanelOverview => "panel-overview".to_string(),
        WizardStage::Task { index } => format!("task {index}"),
        WizardStage::Download => "download".to_string(),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<CreatorConfig> {
    match path {
        Some(path) => CreatorConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(CreatorConfig::default()),
    }
}

fn load_form(path: &Path) -> Result<FormValues> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read form from {}", path.display()))?;
    FormValues::from_yaml_str(&text)
        .with_context(|| format!("failed to parse form from {}", path.display()))
}

fn load_tags(path: &Path) -> Result<CategoryTags> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read tags from {}", path.display()))?;
    CategoryTags::from_yaml_str(&text)
        .with_context(|| format!("failed to parse tags from {}", path.display()))
}

fn write_artifacts(dir: &Path, artifacts: &[Artifact]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;

    artifacts
        .iter()
        .map(|artifact| {
            let stem = match artifact.file_stem() {
                "" => UNTITLED_STEM,
                stem => stem,
            };
            let path = dir.join(format!("{stem}.{}", artifact.extension()));
            fs::write(&path, &artifact.content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote artifact");
            Ok(path)
        })
        .collect()
}
