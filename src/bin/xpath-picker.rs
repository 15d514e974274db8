//! xpath-picker CLI
//!
//! Computes a stable XPath for one element of a DOM snapshot (JSON file) or of
//! a live page, and prints the result as JSON.

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser};
use serde_json::json;
use std::path::PathBuf;
use xpath_picker::{BrowserSession, Document, ElementAction, InferenceOptions, LaunchOptions, NodeId, SelectorEngine};

#[derive(Parser)]
#[command(name = "xpath-picker")]
#[command(version)]
#[command(about = "Infer a stable XPath locator for a DOM element", long_about = None)]
struct Cli {
    #[command(flatten)]
    source: Source,

    #[command(flatten)]
    target: Target,

    /// JSON file with inference options (missing fields use defaults)
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Also print every candidate that was generated
    #[arg(long)]
    all_candidates: bool,

    /// Launch the browser in headed mode (with --url)
    #[arg(long, short = 'H')]
    headed: bool,

    /// Path to custom browser executable (with --url)
    #[arg(long, value_name = "PATH")]
    executable_path: Option<PathBuf>,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct Source {
    /// DOM snapshot JSON file
    #[arg(long, value_name = "FILE")]
    dom: Option<PathBuf>,

    /// Page to load in headless Chrome
    #[arg(long, value_name = "URL")]
    url: Option<String>,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct Target {
    /// XPath selecting exactly one element
    #[arg(long, value_name = "XPATH")]
    target: Option<String>,

    /// Child-element indices from the root element, e.g. `0.1.2`
    #[arg(long, value_name = "INDICES")]
    path: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let options = match &cli.options {
        Some(path) => {
            let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?
        }
        None => InferenceOptions::default(),
    };

    let mut session = None;
    let document = match (&cli.source.dom, &cli.source.url) {
        (Some(path), _) => {
            let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            Document::from_json(&raw)?
        }
        (None, Some(url)) => {
            let mut launch = LaunchOptions::new().headless(!cli.headed);
            if let Some(path) = &cli.executable_path {
                launch = launch.chrome_path(path);
            }
            let browser = BrowserSession::launch(launch)?;
            browser.navigate(url)?;
            let document = browser.snapshot_dom()?;
            session = Some(browser);
            document
        }
        (None, None) => bail!("either --dom or --url is required"),
    };

    let node = resolve_target(&document, &cli.target)?;
    let engine = SelectorEngine::new(&document).with_options(options);
    let locator = engine.compute_locator(node)?;

    let mut output = json!({
        "element": document.describe(node),
        "locator": locator,
        "action": ElementAction::for_element(&document, node).as_str(),
    });

    if cli.all_candidates {
        output["candidates"] = serde_json::to_value(engine.generate_candidates(node))?;
    }

    if let Some(browser) = &session {
        output["live_matches"] = json!(browser.count_matches(&locator.expression)?);
        browser.close()?;
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn resolve_target(document: &Document, target: &Target) -> Result<NodeId> {
    if let Some(expression) = &target.target {
        let nodes = document.evaluate(expression, document.root())?;
        return match nodes.as_slice() {
            [node] if document.is_element(*node) => Ok(*node),
            [_] => bail!("'{}' does not select an element", expression),
            [] => bail!("'{}' selects nothing", expression),
            _ => bail!("'{}' selects {} nodes, expected one", expression, nodes.len()),
        };
    }

    let indices = target.path.as_deref().unwrap_or_default();
    let path = indices
        .split('.')
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<usize>().with_context(|| format!("invalid index '{}'", part)))
        .collect::<Result<Vec<_>>>()?;

    document
        .element_at_path(&path)
        .ok_or_else(|| anyhow!("no element at path '{}'", indices))
}
