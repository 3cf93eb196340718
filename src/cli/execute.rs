use std::process::exit;

use tracing::error;

use multimap_r_drive::{MultimapStore, StoreConfig};

use super::commands::Commands;
use super::parser::Cli;

fn open_store(cli: &Cli) -> MultimapStore {
    let config = match cli.length {
        Some(length) => StoreConfig::with_length(&cli.storage, length),
        None => StoreConfig::new(&cli.storage),
    };

    match MultimapStore::open(config) {
        Ok(store) => store,
        Err(err) => {
            error!(%err, "failed to open store");
            eprintln!("error: {err}");
            exit(1);
        }
    }
}

fn print_values(values: &[Vec<u8>]) {
    for value in values {
        println!("{}", String::from_utf8_lossy(value));
    }
}

pub fn execute_command(cli: &Cli) {
    let store = open_store(cli);

    match &cli.command {
        Commands::Add { key, values } => {
            let values: Vec<&[u8]> = values.iter().map(|v| v.as_bytes()).collect();
            if let Err(err) = store.add(key.as_bytes(), &values) {
                eprintln!("error: {err}");
                exit(1);
            }
        }

        Commands::Get { key } => {
            print_values(&store.get(key.as_bytes()));
        }

        Commands::Del { key, values } => {
            let values: Vec<&[u8]> = values.iter().map(|v| v.as_bytes()).collect();
            store.del(key.as_bytes(), &values);
        }

        Commands::DelByPrefix { key, prefixes } => {
            let prefixes: Vec<&[u8]> = prefixes.iter().map(|p| p.as_bytes()).collect();
            store.del_by_prefix(key.as_bytes(), &prefixes);
        }

        Commands::Update { key, values } => {
            let values: Vec<&[u8]> = values.iter().map(|v| v.as_bytes()).collect();
            if let Err(err) = store.update(key.as_bytes(), &values) {
                eprintln!("error: {err}");
                exit(1);
            }
        }

        Commands::Exist { key } => {
            println!("{}", store.exist(key.as_bytes()));
        }
    }
}
