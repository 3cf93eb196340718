use clap::Subcommand;

/// The six operations the engine exposes, one-to-one.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Append one or more values to a key's chain.
    Add {
        key: String,
        #[arg(required = true, num_args = 1..)]
        values: Vec<String>,
    },

    /// List every live value for a key, in chain order.
    Get { key: String },

    /// Tombstone the given values under a key.
    Del {
        key: String,
        #[arg(required = true, num_args = 1..)]
        values: Vec<String>,
    },

    /// Tombstone every value under a key starting with any of the given
    /// prefixes.
    DelByPrefix {
        key: String,
        #[arg(required = true, num_args = 1..)]
        prefixes: Vec<String>,
    },

    /// Atomically replace a key's values.
    Update {
        key: String,
        #[arg(required = true, num_args = 1..)]
        values: Vec<String>,
    },

    /// Report whether a key currently has any values.
    Exist { key: String },
}
