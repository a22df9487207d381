use crate::bencode::{self, BencodeValue};
use crate::error::Result;
use crate::torrent::{load_torrent_file, parse_torrent, Torrent};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::error;

#[derive(Parser)]
#[command(name = "bentools")]
#[command(about = "Tools to encode data to and decode data from the bencode format", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a JSON torrent description to bencode
    Encode {
        /// Input file (defaults to standard input)
        input: Option<PathBuf>,

        /// Output file (defaults to standard output)
        output: Option<PathBuf>,

        /// Treat the input as arbitrary JSON instead of a torrent description
        #[arg(long)]
        generic: bool,
    },

    /// Decode bencoded torrent data to JSON
    Decode {
        /// Input file (defaults to standard input)
        input: Option<PathBuf>,

        /// Output file (defaults to standard output)
        output: Option<PathBuf>,

        /// Emit the raw value tree as JSON instead of a torrent record
        #[arg(long)]
        generic: bool,
    },

    /// Show a summary of bencoded torrent data
    Show {
        /// Input file (defaults to standard input)
        input: Option<PathBuf>,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Run the selected subcommand.
    ///
    /// Failures are reported on the error stream but never alter the
    /// process exit status.
    pub async fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Encode {
                input,
                output,
                generic,
            } => {
                if let Err(e) = self.encode(input, output, *generic).await {
                    error!("encode error: {}", e);
                }
            }

            Commands::Decode {
                input,
                output,
                generic,
            } => {
                if let Err(e) = self.decode(input, output, *generic).await {
                    error!("decode error: {}", e);
                }
            }

            Commands::Show { input } => {
                if let Err(e) = self.show(input).await {
                    error!("show error: {}", e);
                }
            }
        }

        Ok(())
    }

    async fn encode(
        &self,
        input: &Option<PathBuf>,
        output: &Option<PathBuf>,
        generic: bool,
    ) -> Result<()> {
        let data = read_input(input).await?;

        let value = if generic {
            BencodeValue::from_json(&serde_json::from_slice(&data)?)?
        } else {
            let torrent: Torrent = serde_json::from_slice(&data)?;
            torrent.to_bencode()
        };

        let mut encoded = Vec::new();
        bencode::Encoder::new(&mut encoded).encode(&value)?;

        write_output(output, &encoded).await
    }

    async fn decode(
        &self,
        input: &Option<PathBuf>,
        output: &Option<PathBuf>,
        generic: bool,
    ) -> Result<()> {
        let data = read_input(input).await?;
        let value = bencode::Decoder::new(&data[..]).decode()?;

        let mut json = if generic {
            serde_json::to_vec_pretty(&value.to_json())?
        } else {
            serde_json::to_vec(&Torrent::from_bencode(&value)?)?
        };
        json.push(b'\n');

        write_output(output, &json).await
    }

    async fn show(&self, input: &Option<PathBuf>) -> Result<()> {
        let torrent = match input {
            Some(path) => load_torrent_file(path).await?,
            None => {
                let mut data = Vec::new();
                tokio::io::stdin().read_to_end(&mut data).await?;
                parse_torrent(&data)?
            }
        };

        println!("{}", torrent.summary());
        println!("Info Hash: {}", torrent.info_hash_hex());

        Ok(())
    }
}

async fn read_input(path: &Option<PathBuf>) -> Result<Vec<u8>> {
    match path {
        Some(path) => Ok(fs::read(path).await?),
        None => {
            let mut data = Vec::new();
            tokio::io::stdin().read_to_end(&mut data).await?;
            Ok(data)
        }
    }
}

async fn write_output(path: &Option<PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => Ok(fs::write(path, data).await?),
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(data).await?;
            stdout.flush().await?;
            Ok(())
        }
    }
}
