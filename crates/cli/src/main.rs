//! Bookstore Cart CLI - inspect and edit a cart file.
//!
//! The file uses the same JSON layout the browser widget keeps in
//! `localStorage`, so a cart can be copied out of a browser, edited here and
//! pasted back.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart in ./cart.json
//! cart-cli show
//!
//! # Add a book to another cart file
//! cart-cli --file /tmp/cart.json add --id hobbit --title "The Hobbit" --price 12.50
//!
//! # Set row 0 to three copies, then drop row 1
//! cart-cli set-quantity 0 3
//! cart-cli remove 1
//!
//! # Print the cart table rows
//! cart-cli export-html
//! ```
//!
//! # Commands
//!
//! - `show` - List lines and the grand total
//! - `add` - Add an item, merging by id
//! - `set-quantity` - Overwrite a line's quantity
//! - `remove` - Remove a line
//! - `clear` - Delete the cart
//! - `export-html` - Render the cart table rows

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use bookstore_cart_cli::commands::cart;
use bookstore_cart_cli::{DEFAULT_CART_FILE, FileStore};
use bookstore_cart_core::{DEFAULT_CURRENCY_SYMBOL, ItemAttributes, PriceFormat};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cart-cli")]
#[command(author, version, about = "Bookstore cart file tools")]
struct Cli {
    /// Cart file path
    #[arg(short, long, global = true, env = "CART_FILE", default_value = DEFAULT_CART_FILE)]
    file: PathBuf,

    /// Currency symbol used in totals
    #[arg(long, global = true, env = "CART_CURRENCY_SYMBOL", default_value = DEFAULT_CURRENCY_SYMBOL)]
    currency: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List lines and the grand total
    Show,
    /// Add an item to the cart
    Add {
        /// Item id (derived from the title when omitted)
        #[arg(long)]
        id: Option<String>,

        /// Book title
        #[arg(short, long)]
        title: Option<String>,

        /// Author name
        #[arg(short, long)]
        author: Option<String>,

        /// Publisher name
        #[arg(long)]
        publisher: Option<String>,

        /// Unit price
        #[arg(short, long)]
        price: Option<String>,

        /// Cover image URL
        #[arg(long)]
        image: Option<String>,

        /// Copies to add
        #[arg(short, long, default_value = "1")]
        quantity: String,
    },
    /// Overwrite the quantity of a line
    SetQuantity {
        /// Row index as shown by `show`
        index: usize,

        /// New quantity (values below 1 become 1)
        quantity: String,
    },
    /// Remove a line
    Remove {
        /// Row index as shown by `show`
        index: usize,
    },
    /// Delete the cart file
    Clear,
    /// Render the cart table rows as HTML
    ExportHtml {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing, info level unless RUST_LOG says otherwise
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = FileStore::new(cli.file);
    let format = PriceFormat::new(cli.currency);

    match cli.command {
        Commands::Show => {
            cart::show(&store, &format);
        }
        Commands::Add {
            id,
            title,
            author,
            publisher,
            price,
            image,
            quantity,
        } => {
            let attributes = ItemAttributes {
                id,
                title,
                author,
                publisher,
                price,
                image,
            };
            cart::add(&mut store, attributes, Some(&quantity))?;
        }
        Commands::SetQuantity { index, quantity } => {
            cart::set_quantity(&mut store, index, &quantity)?;
        }
        Commands::Remove { index } => {
            cart::remove(&mut store, index)?;
        }
        Commands::Clear => cart::clear(&mut store)?,
        Commands::ExportHtml { output } => {
            cart::export_html(&store, &format, output.as_deref())?;
        }
    }
    Ok(())
}
