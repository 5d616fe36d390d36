//! `studio` - replay recorded agent envelopes through the studio workflows

mod replay;

use anyhow::{Context, Result};
use clap::builder::PossibleValuesParser;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use replay::ReplayGateway;
use std::path::PathBuf;
use std::process::ExitCode;
use studio_core::records::{ASPECT_RATIOS, AUDIENCES, FORMATS, STYLES, TONES};
use studio_core::{
    AgentKind, ContentRequest, DashboardSummary, GraphicRequest, SeoRequest, Studio,
    StudioConfig, WorkflowError,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn envelopes_arg() -> Arg {
    Arg::new("envelopes")
        .required(true)
        .num_args(1..)
        .value_parser(value_parser!(PathBuf))
        .help("Envelope JSON files, one per request, replayed in order")
}

fn cli() -> Command {
    Command::new("studio")
        .version(studio_core::VERSION)
        .about("Replay recorded agent envelopes through the content, SEO and graphic workflows")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print the dashboard summary as JSON"),
        )
        .arg(
            Arg::new("sample")
                .long("sample")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Summarize empty histories with sample records"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("content")
                .about("Draft content, one request per envelope")
                .arg(Arg::new("topic").long("topic").required(true).help("Topic to write about"))
                .arg(
                    Arg::new("audience")
                        .long("audience")
                        .default_value(AUDIENCES[0])
                        .value_parser(PossibleValuesParser::new(AUDIENCES)),
                )
                .arg(
                    Arg::new("tone")
                        .long("tone")
                        .default_value(TONES[0])
                        .value_parser(PossibleValuesParser::new(TONES)),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value(FORMATS[0])
                        .value_parser(PossibleValuesParser::new(FORMATS)),
                )
                .arg(
                    Arg::new("word-count")
                        .long("word-count")
                        .default_value("800")
                        .value_parser(value_parser!(u32)),
                )
                .arg(envelopes_arg()),
        )
        .subcommand(
            Command::new("seo")
                .about("Audit text for SEO, one request per envelope")
                .arg(Arg::new("text").long("text").required(true).help("Text to audit"))
                .arg(keyword_arg())
                .arg(envelopes_arg()),
        )
        .subcommand(
            Command::new("graphic")
                .about("Generate graphics, one request per envelope")
                .arg(
                    Arg::new("description")
                        .long("description")
                        .required(true)
                        .help("What the graphic should show"),
                )
                .arg(
                    Arg::new("style")
                        .long("style")
                        .default_value(STYLES[0])
                        .value_parser(PossibleValuesParser::new(STYLES)),
                )
                .arg(
                    Arg::new("aspect-ratio")
                        .long("aspect-ratio")
                        .default_value(ASPECT_RATIOS[1])
                        .value_parser(PossibleValuesParser::new(ASPECT_RATIOS)),
                )
                .arg(envelopes_arg()),
        )
        .subcommand(
            Command::new("pipeline")
                .about("Draft content, hand it off and audit the draft")
                .arg(Arg::new("topic").long("topic").required(true))
                .arg(keyword_arg())
                .arg(
                    Arg::new("content-envelope")
                        .long("content-envelope")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("seo-envelope")
                        .long("seo-envelope")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
        .subcommand(Command::new("agents").about("List configured agents"))
}

fn keyword_arg() -> Arg {
    Arg::new("keyword")
        .long("keyword")
        .action(ArgAction::Append)
        .help("Target keyword, repeatable")
}

fn init_logging(verbose: bool, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("studio=debug,studio_core=debug")
        } else {
            EnvFilter::new("studio=info,studio_core=info")
        }
    });

    let json_layer = json.then(|| fmt::layer().json().with_writer(std::io::stderr));
    let text_layer = (!json).then(|| {
        fmt::layer()
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(json_layer)
        .with(text_layer)
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let matches = cli().get_matches();
    init_logging(matches.get_flag("verbose"), matches.get_flag("log-json"));

    match run(&matches).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

/// Returns whether every replayed request succeeded
async fn run(matches: &ArgMatches) -> Result<bool> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => StudioConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => StudioConfig::new(),
    };
    if matches.get_flag("sample") {
        config = config.with_sample(true);
    }

    let gateway = ReplayGateway::new();
    let mut all_ok = true;

    let studio = match matches.subcommand() {
        Some(("content", args)) => {
            let request = ContentRequest::new(required(args, "topic")?)
                .with_audience(required(args, "audience")?)
                .with_tone(required(args, "tone")?)
                .with_format(required(args, "format")?)
                .with_word_count(args.get_one::<u32>("word-count").copied().unwrap_or(800));
            let count = queue(&gateway, &config, AgentKind::ContentCoordinator, args)?;

            let studio = Studio::new(gateway, config);
            for _ in 0..count {
                let outcome = studio.generate_content(&request).await;
                all_ok &= report(outcome.map(|r| format!("recorded \"{}\"", r.title)));
            }
            studio
        }
        Some(("seo", args)) => {
            let request = with_keywords(SeoRequest::new(required(args, "text")?), args);
            let count = queue(&gateway, &config, AgentKind::SeoAnalyst, args)?;

            let studio = Studio::new(gateway, config);
            for _ in 0..count {
                let outcome = studio.analyze_seo(&request).await;
                all_ok &= report(outcome.map(|r| {
                    format!("audited, score {} ({:?})", r.clamped_score(), r.band())
                }));
            }
            studio
        }
        Some(("graphic", args)) => {
            let request = GraphicRequest::new(required(args, "description")?)
                .with_style(required(args, "style")?)
                .with_aspect_ratio(required(args, "aspect-ratio")?);
            let count = queue(&gateway, &config, AgentKind::GraphicGenerator, args)?;

            let studio = Studio::new(gateway, config);
            for _ in 0..count {
                let outcome = studio.generate_graphic(&request).await;
                all_ok &= report(outcome.map(|r| format!("recorded {}", r.image_url)));
            }
            studio
        }
        Some(("pipeline", args)) => {
            let content_path = required_path(args, "content-envelope")?;
            let seo_path = required_path(args, "seo-envelope")?;
            gateway.load(
                config.agents.id_for(AgentKind::ContentCoordinator),
                &[content_path],
            )?;
            gateway.load(config.agents.id_for(AgentKind::SeoAnalyst), &[seo_path])?;

            let studio = Studio::new(gateway, config);
            let draft = studio
                .generate_content(&ContentRequest::new(required(args, "topic")?))
                .await;
            match draft {
                Ok(draft) => {
                    println!("content: drafted \"{}\"", draft.title);
                    studio.send_to_seo(&draft);
                    match studio.seed_seo_request() {
                        Some(request) => {
                            let outcome = studio.analyze_seo(&with_keywords(request, args)).await;
                            all_ok &= report(
                                outcome.map(|r| format!("audited, score {}", r.clamped_score())),
                            );
                        }
                        None => {
                            eprintln!("seo: draft has no body to audit");
                            all_ok = false;
                        }
                    }
                }
                Err(e) => all_ok &= report::<String>(Err(e)),
            }
            studio
        }
        Some(("agents", _)) => {
            for agent in AgentKind::ALL {
                println!(
                    "{:<22} {}  {}",
                    agent.name(),
                    config.agents.id_for(agent),
                    agent.purpose()
                );
            }
            return Ok(true);
        }
        _ => anyhow::bail!("no subcommand given"),
    };

    print_summary(&studio.dashboard(), matches.get_flag("json"))?;
    Ok(all_ok)
}

fn required(args: &ArgMatches, id: &str) -> Result<String> {
    args.get_one::<String>(id)
        .cloned()
        .with_context(|| format!("missing --{id}"))
}

fn required_path(args: &ArgMatches, id: &str) -> Result<PathBuf> {
    args.get_one::<PathBuf>(id)
        .cloned()
        .with_context(|| format!("missing --{id}"))
}

fn with_keywords(mut request: SeoRequest, args: &ArgMatches) -> SeoRequest {
    for keyword in args.get_many::<String>("keyword").into_iter().flatten() {
        request.add_keyword(keyword);
    }
    request
}

fn queue(
    gateway: &ReplayGateway,
    config: &StudioConfig,
    agent: AgentKind,
    args: &ArgMatches,
) -> Result<usize> {
    let paths: Vec<PathBuf> = args
        .get_many::<PathBuf>("envelopes")
        .into_iter()
        .flatten()
        .cloned()
        .collect();
    gateway.load(config.agents.id_for(agent), &paths)
}

fn report<T: std::fmt::Display>(outcome: Result<T, WorkflowError>) -> bool {
    match outcome {
        Ok(line) => {
            println!("ok: {line}");
            true
        }
        Err(e) => {
            let hint = if e.is_retryable() { " (retry)" } else { "" };
            eprintln!("{}: {e}{hint}", e.workflow());
            false
        }
    }
}

fn print_summary(summary: &DashboardSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    println!();
    println!("Content Pieces:   {}", summary.content_count);
    println!("Avg SEO Score:    {}", summary.average_seo_score);
    println!("Graphics Created: {}", summary.graphics_count);
    if summary.showing_sample {
        println!("(sample data shown for empty histories)");
    }

    println!("Recent Content:");
    for item in &summary.recent_content {
        println!(
            "  - {} [{}] {} words",
            item.title, item.format, item.word_count
        );
    }
    println!("Recent Graphics:");
    for item in &summary.recent_graphics {
        println!("  - {} {}", item.description, item.image_url);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn content_defaults_apply() {
        let matches = cli()
            .try_get_matches_from(["studio", "content", "--topic", "ai", "a.json"])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        assert_eq!(required(args, "tone").unwrap(), "Professional");
        assert_eq!(args.get_one::<u32>("word-count").copied(), Some(800));
    }

    #[test]
    fn unknown_tone_is_rejected() {
        let result = cli().try_get_matches_from([
            "studio", "content", "--topic", "ai", "--tone", "Grim", "a.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn keywords_are_deduplicated() {
        let matches = cli()
            .try_get_matches_from([
                "studio", "seo", "--text", "t", "--keyword", "ai", "--keyword", "ai", "a.json",
            ])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        let request = with_keywords(SeoRequest::new("t"), args);
        assert_eq!(request.keywords(), ["ai"]);
    }

    #[tokio::test]
    async fn replayed_failure_reports_false() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, br#"{"success": false, "error": "rate limited"}"#)
            .unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let matches = cli()
            .try_get_matches_from(["studio", "content", "--topic", "ai", path.as_str()])
            .unwrap();
        assert!(!run(&matches).await.unwrap());
    }
}
