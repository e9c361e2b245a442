use std::{
    fs::OpenOptions,
    io::{BufWriter, Write},
};

use anyhow::Context;
use log::info;
use portfolio_content::{
    config::{cli, Config},
    generator::generate,
};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = cli().get_matches();
    let config = Config::from_matches(&matches)?;

    let output = generate(&config)?;

    match &config.out {
        Some(out_path) => {
            if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let fd = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(out_path)
                .with_context(|| format!("while opening {out_path:?}"))?;
            let mut writer = BufWriter::new(fd);
            writer.write_all(output.as_bytes())?;
            writer.flush()?;
            info!("Wrote {out_path:?}");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{output}")?;
        }
    }

    Ok(())
}
