mod cli;

use std::future::Future;
use std::path::Path;

use anyhow::{Context, Result};
use bytes::Bytes;
use clap::Parser;

use cli::{Cli, Commands};
use pf_av::{FfmpegTool, ToolRegistry, Transformed};
use pf_core::config::Config;
use pf_core::Dimensions;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG if set, otherwise pick defaults from the verbose flag.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "pixforge=trace,pf_server=debug,pf_av=trace,tower_http=debug".to_string()
        } else {
            "pixforge=info,pf_server=info,pf_av=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Start { host, port } => {
            let mut config = Config::load_or_default(config_path)?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            tracing::info!("Starting pixforge server");
            block_on(pf_server::start(config))??;
            Ok(())
        }
        Commands::Probe { file, json } => probe_file(&file, json, config_path),
        Commands::Convert { input, output } => {
            transform_file(&input, &output, config_path, |tool, data| async move {
                pf_av::convert_png_to_jpeg(&tool, data).await
            })
        }
        Commands::Resize {
            input,
            output,
            width,
            height,
        } => transform_file(&input, &output, config_path, move |tool, data| async move {
            pf_av::resize(&tool, data, Dimensions::new(width.into(), height.into())).await
        }),
        Commands::Compress {
            input,
            output,
            level,
        } => transform_file(&input, &output, config_path, move |tool, data| async move {
            pf_av::compress(&tool, data, level).await
        }),
        Commands::CheckTools => check_tools(config_path),
        Commands::Validate {
            config: validate_path,
        } => validate_config(validate_path.as_deref().or(config_path)),
        Commands::Openapi => {
            let doc = pf_server::router::openapi();
            println!("{}", serde_json::to_string_pretty(&doc)?);
            Ok(())
        }
        Commands::Version => {
            println!("pixforge {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let rt = tokio::runtime::Runtime::new()?;
    Ok(rt.block_on(future))
}

/// Build the ffmpeg-backed tool from config and `PATH`.
fn media_tool(config_path: Option<&Path>) -> Result<FfmpegTool> {
    let config = Config::load_or_default(config_path)?;
    let registry = ToolRegistry::discover(&config.tools);
    Ok(FfmpegTool::from_registry(&registry, &config.tools)?)
}

fn read_image(file: &Path) -> Result<Bytes> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {:?}", file);
    }
    let data = std::fs::read(file).with_context(|| format!("Failed to read {file:?}"))?;
    Ok(Bytes::from(data))
}

fn probe_file(file: &Path, json: bool, config_path: Option<&Path>) -> Result<()> {
    let data = read_image(file)?;
    let tool = media_tool(config_path)?;

    let (format, size) = block_on(async {
        let format = pf_av::probe_format(&tool, data.clone()).await?;
        let size = pf_av::probe_size(&tool, data).await?;
        Ok::<_, pf_core::Error>((format, size))
    })??;

    if json {
        let value = serde_json::json!({
            "file": file,
            "format": format.codec_name(),
            "mime_type": format.mime_type(),
            "width": size.width,
            "height": size.height,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("File: {}", file.display());
        println!("Format: {} ({})", format, format.mime_type());
        println!("Size: {size}");
    }

    Ok(())
}

fn transform_file<F, Fut>(
    input: &Path,
    output: &Path,
    config_path: Option<&Path>,
    op: F,
) -> Result<()>
where
    F: FnOnce(FfmpegTool, Bytes) -> Fut,
    Fut: Future<Output = pf_core::Result<Transformed>>,
{
    let data = read_image(input)?;
    let tool = media_tool(config_path)?;
    let input_len = data.len();

    let out = block_on(op(tool, data))??;

    std::fs::write(output, &out.data).with_context(|| format!("Failed to write {output:?}"))?;
    tracing::info!(
        "{} -> {} ({}, {} -> {} bytes)",
        input.display(),
        output.display(),
        out.content_type(),
        input_len,
        out.data.len()
    );
    println!("{}", output.display());
    Ok(())
}

fn check_tools(config_path: Option<&Path>) -> Result<()> {
    println!("Checking external tools...\n");

    let config = Config::load_or_default(config_path)?;
    let tools = ToolRegistry::discover(&config.tools).check_all();
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version.lines().next().unwrap_or(""));
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Install ffmpeg to enable image processing.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = Config::load(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            Config::default()
        }
    };

    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Max upload: {} bytes", config.server.max_upload_bytes);
    for (name, path) in [
        ("ffmpeg", &config.tools.ffmpeg_path),
        ("ffprobe", &config.tools.ffprobe_path),
    ] {
        match path {
            Some(p) => println!("  {name}: {}", p.display()),
            None => println!("  {name}: from PATH"),
        }
    }

    let warnings = config.validate();
    for warning in &warnings {
        println!("⚠ {warning}");
    }

    Ok(())
}
