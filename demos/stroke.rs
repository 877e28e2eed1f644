//! Very simple tool that accepts SVG path as an input and produces SVG path of its stroke
use pathstroke::*;
use std::{
    env,
    fs::File,
    io::{BufWriter, Read, Write},
};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

type Error = Box<dyn std::error::Error>;

#[derive(Debug)]
struct Args {
    input_file: String,
    output_file: String,
    config: StrokeConfig,
}

fn parse_joint(joint: &str) -> Result<JointStyle, Error> {
    match joint {
        "miter" => Ok(JointStyle::Miter),
        "round" => Ok(JointStyle::Round),
        "bevel" => Ok(JointStyle::Bevel),
        _ => Err(format!("unknown joint style: {}", joint).into()),
    }
}

fn parse_cap(cap: &str) -> Result<EndCapStyle, Error> {
    match cap {
        "butt" => Ok(EndCapStyle::Butt),
        "square" => Ok(EndCapStyle::Square),
        "round" => Ok(EndCapStyle::Round),
        _ => Err(format!("unknown cap style: {}", cap).into()),
    }
}

fn parse_dash(dash: &str) -> Result<DashPattern, Error> {
    let lengths = dash
        .split(',')
        .map(|length| length.trim().parse::<Scalar>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(DashPattern::new(&lengths)?)
}

impl Args {
    fn parse() -> Result<Args, Error> {
        let mut result = Args {
            input_file: String::new(),
            output_file: String::new(),
            config: StrokeConfig::default(),
        };
        let mut positional = 0;
        let mut args = env::args();
        let cmd = args.next().unwrap_or_else(|| "stroke".to_owned());
        while let Some(arg) = args.next() {
            match arg.as_ref() {
                "-h" => {
                    positional = 0;
                    break;
                }
                "-c" => {
                    let config = args.next().ok_or("-c requires argument")?;
                    result.config = StrokeConfig::from_json(File::open(config)?)?;
                }
                "-w" => {
                    let width = args.next().ok_or("-w requires argument")?;
                    result.config.style = result.config.style.with_thickness(width.parse()?);
                }
                "-j" => {
                    let joint = args.next().ok_or("-j requires argument")?;
                    result.config.style = result.config.style.with_joint(parse_joint(&joint)?);
                }
                "-e" => {
                    let cap = args.next().ok_or("-e requires argument")?;
                    result.config.style = result.config.style.with_cap(parse_cap(&cap)?);
                }
                "-d" => {
                    let dash = args.next().ok_or("-d requires argument")?;
                    result.config.dash = Some(parse_dash(&dash)?);
                }
                "-a" => {
                    let accuracy = args.next().ok_or("-a requires argument")?;
                    result.config.accuracy = accuracy.parse()?;
                }
                "-m" => {
                    let miter_limit = args.next().ok_or("-m requires argument")?;
                    result.config.miter_limit = miter_limit.parse()?;
                }
                _ => {
                    positional += 1;
                    match positional {
                        1 => result.input_file = arg,
                        2 => result.output_file = arg,
                        _ => return Err("unexpected positional argment".into()),
                    }
                }
            }
        }
        if positional < 2 {
            eprintln!(
                "Very simple tool that accepts SVG path as an input and produces SVG path of its stroke"
            );
            eprintln!("\nUSAGE:");
            eprintln!(
                "    {} [-c <config.json>] [-w <width>] [-j <joint>] [-e <cap>] [-d <dash>] [-a <accuracy>] [-m <miter_limit>] <file.path> <out.path>",
                cmd
            );
            eprintln!("\nARGS:");
            eprintln!("    -c <config.json>   load stroke configuration from JSON file");
            eprintln!("    -w <width>         stroke width (default: 1)");
            eprintln!("    -j <joint>         joint style: miter, round or bevel");
            eprintln!("    -e <cap>           end cap style: butt, square or round");
            eprintln!("    -d <dash>          comma separated dash lengths, e.g. 4,2");
            eprintln!("    -a <accuracy>      flattening accuracy (default: 1)");
            eprintln!(
                "    -m <miter_limit>   miter limit in stroke widths (default: {})",
                MITER_LIMIT
            );
            eprintln!("    <file.path>        file containing SVG path ('-' means stdin)");
            eprintln!("    <out.path>         SVG path of the stroke ('-' means stdout)");
            std::process::exit(1);
        }
        Ok(result)
    }
}

/// Load path for the file
fn path_load(path: String) -> Result<Path, Error> {
    let mut contents = String::new();
    if path != "-" {
        let mut file = File::open(path)?;
        file.read_to_string(&mut contents)?;
    } else {
        std::io::stdin().read_to_string(&mut contents)?;
    }
    Ok(tracing::debug_span!("[parse]").in_scope(|| contents.parse())?)
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse()?;
    tracing::debug!("[config] {:?}", args.config);

    let path = path_load(args.input_file)?;
    tracing::debug!("[path:segments_count] {}", path.segments_count());

    let outline = args.config.apply(&path, Transform::identity());
    tracing::debug!("[outline:segments_count] {}", outline.segments_count());

    let save = tracing::debug_span!("[save]");
    let _guard = save.enter();
    if args.output_file != "-" {
        let mut file = BufWriter::new(File::create(args.output_file)?);
        outline.save(&mut file)?;
        file.flush()?;
    } else {
        outline.save(std::io::stdout())?;
    }

    Ok(())
}
