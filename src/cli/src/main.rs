//! Command-line client for ledger token operations.

mod commands;
mod config;

use anyhow::Result;
use colored::Colorize;
use commands::transfer::TransferAction;
use commands::{balance, collection, token, transfer};
use std::path::PathBuf;
use structopt::StructOpt;
use token_client::{LocalAccount, TokenClient};
use token_core::payload::{CollectionParams, RoyaltyOptions, TokenParams, TokenProperties};
use token_core::{Address, TokenDataId, TokenId};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Command line arguments for the token CLI.
#[derive(Debug, StructOpt)]
#[structopt(name = "token", about = "Issue, transfer and query ledger tokens")]
struct Opt {
    /// Path to the configuration file
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Path to the account key file
    #[structopt(short, long, parse(from_os_str))]
    account: Option<PathBuf>,

    /// Node to connect to
    #[structopt(short, long)]
    node: Option<String>,

    /// Subcommand to run
    #[structopt(subcommand)]
    cmd: Command,
}

/// Identifies a token edition on the command line.
#[derive(Debug, StructOpt)]
struct TokenArgs {
    /// Creator of the token
    #[structopt(long)]
    creator: Address,

    /// Collection holding the token
    #[structopt(long)]
    collection: String,

    /// Token name
    #[structopt(long)]
    name: String,

    /// Property version (defaults to 0)
    #[structopt(long)]
    property_version: Option<u64>,
}

impl TokenArgs {
    fn token_id(&self) -> TokenId {
        TokenId::new(
            TokenDataId::new(self.creator, self.collection.clone(), self.name.clone()),
            self.property_version,
        )
    }
}

/// Subcommands for the token CLI.
#[derive(Debug, StructOpt)]
enum Command {
    /// Create a collection
    #[structopt(name = "create-collection")]
    CreateCollection {
        #[structopt(long)]
        name: String,
        #[structopt(long)]
        description: String,
        #[structopt(long)]
        uri: String,
        /// Maximum number of token types (unbounded if omitted)
        #[structopt(long)]
        maximum: Option<u64>,
    },

    /// Create a token in one of your collections
    #[structopt(name = "create-token")]
    CreateToken {
        #[structopt(long)]
        collection: String,
        #[structopt(long)]
        name: String,
        #[structopt(long)]
        description: String,
        #[structopt(long)]
        supply: u64,
        #[structopt(long)]
        uri: String,
        /// Maximum supply (unbounded if omitted)
        #[structopt(long)]
        maximum: Option<u64>,
        /// Royalty payee (defaults to the creator)
        #[structopt(long)]
        royalty_payee: Option<Address>,
        #[structopt(long, default_value = "0")]
        royalty_denominator: u64,
        #[structopt(long, default_value = "0")]
        royalty_numerator: u64,
        /// Property key, repeatable
        #[structopt(long = "property-key")]
        property_keys: Vec<String>,
        /// Property value, repeatable
        #[structopt(long = "property-value")]
        property_values: Vec<String>,
        /// Property type, repeatable
        #[structopt(long = "property-type")]
        property_types: Vec<String>,
    },

    /// Offer tokens to another account
    #[structopt(name = "offer")]
    Offer {
        #[structopt(long)]
        receiver: Address,
        #[structopt(flatten)]
        token: TokenArgs,
        #[structopt(long)]
        amount: u64,
    },

    /// Claim tokens offered to you
    #[structopt(name = "claim")]
    Claim {
        #[structopt(long)]
        sender: Address,
        #[structopt(flatten)]
        token: TokenArgs,
    },

    /// Cancel a pending offer
    #[structopt(name = "cancel-offer")]
    CancelOffer {
        #[structopt(long)]
        receiver: Address,
        #[structopt(flatten)]
        token: TokenArgs,
    },

    /// Show collection data
    #[structopt(name = "collection")]
    Collection {
        #[structopt(long)]
        creator: Address,
        #[structopt(long)]
        name: String,
    },

    /// Show token data
    #[structopt(name = "token-data")]
    TokenData {
        #[structopt(long)]
        creator: Address,
        #[structopt(long)]
        collection: String,
        #[structopt(long)]
        name: String,
    },

    /// Show a token balance
    #[structopt(name = "balance")]
    Balance {
        /// Account to query (defaults to the creator)
        #[structopt(long)]
        owner: Option<Address>,
        #[structopt(flatten)]
        token: TokenArgs,
    },

    /// Show which token resources an account holds
    #[structopt(name = "stores")]
    Stores {
        #[structopt(long)]
        address: Address,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let opt = Opt::from_args();
    let config = config::load(opt.config.as_deref(), opt.node)?;
    let client = TokenClient::connect(&config);
    let account_path = opt.account.unwrap_or_else(config::default_account_path);
    let load_account = || LocalAccount::from_file(&account_path);

    match opt.cmd {
        Command::CreateCollection {
            name,
            description,
            uri,
            maximum,
        } => {
            let mut params = CollectionParams::new(name, description, uri);
            params.maximum = maximum;
            let hash = collection::create(&client, &load_account()?, &params).await?;
            println!("{} {}", "Collection created:".green(), hash);
        }
        Command::CreateToken {
            collection,
            name,
            description,
            supply,
            uri,
            maximum,
            royalty_payee,
            royalty_denominator,
            royalty_numerator,
            property_keys,
            property_values,
            property_types,
        } => {
            let mut params = TokenParams::new(collection, name, description, supply, uri);
            params.maximum = maximum;
            params.royalty = RoyaltyOptions {
                payee_address: royalty_payee,
                denominator: royalty_denominator,
                numerator: royalty_numerator,
            };
            params.properties = TokenProperties {
                keys: property_keys,
                values: property_values,
                types: property_types,
            };
            let hash = token::create(&client, &load_account()?, &params).await?;
            println!("{} {}", "Token created:".green(), hash);
        }
        Command::Offer { receiver, token, amount } => {
            let action = TransferAction::Offer { amount };
            let hash = transfer::run(&client, &load_account()?, action, &receiver, &token.token_id()).await?;
            println!("{} {}", "Offer sent:".green(), hash);
        }
        Command::Claim { sender, token } => {
            let hash = transfer::run(&client, &load_account()?, TransferAction::Claim, &sender, &token.token_id()).await?;
            println!("{} {}", "Token claimed:".green(), hash);
        }
        Command::CancelOffer { receiver, token } => {
            let action = TransferAction::Cancel;
            let hash = transfer::run(&client, &load_account()?, action, &receiver, &token.token_id()).await?;
            println!("{} {}", "Offer cancelled:".green(), hash);
        }
        Command::Collection { creator, name } => {
            let data = collection::show(&client, &creator, &name).await?;
            println!("{}", serde_json::to_string_pretty(&data)?);
            if data.is_unbounded() {
                println!("{}", "Collection is unbounded".yellow());
            }
        }
        Command::TokenData { creator, collection, name } => {
            let data = token::show(&client, &creator, &collection, &name).await?;
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Command::Balance { owner, token } => {
            let balance = balance::run(&client, owner.as_ref(), &token.token_id()).await?;
            println!("{} {}", "Balance:".green(), balance.amount);
        }
        Command::Stores { address } => {
            let stores = balance::stores(&client, &address).await?;
            println!("{} {}", "Collections:".green(), stores.collections);
            println!("{} {}", "Token store:".green(), stores.token_store);
        }
    }

    Ok(())
}
