use clap::{Parser, Subcommand};
use dialoguer::Input;
use dotenvy::dotenv;
use yamdb_cli::admin::create_or_promote_admin;
use yamdb_cli::seeder::{self, SeedConfig};

#[derive(Parser)]
#[command(name = "yamdb-cli")]
#[command(about = "YaMDb CLI - Administrative tools for YaMDb", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an admin account, or promote an existing account to admin
    CreateAdmin {
        /// Username (prompted if not provided)
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Email address (prompted if not provided)
        #[arg(short = 'e', long)]
        email: Option<String>,
    },
    /// Seed the database with fake users, catalog, reviews and comments
    Seed {
        /// Number of users to create
        #[arg(long, default_value = "50")]
        users: usize,

        /// Number of categories
        #[arg(long, default_value = "3")]
        categories: usize,

        /// Number of genres
        #[arg(long, default_value = "8")]
        genres: usize,

        /// Number of titles
        #[arg(short = 't', long, default_value = "40")]
        titles: usize,

        /// Reviews per title
        #[arg(long, default_value = "5")]
        reviews: usize,

        /// Comments per review
        #[arg(long, default_value = "2")]
        comments: usize,
    },
    /// Clear all seeded data (keeps accounts and catalog entries created otherwise)
    ClearSeed,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?;
    let pool = yamdb_db::init_db_pool(&database_url).await?;

    match cli.command {
        Commands::CreateAdmin { username, email } => {
            handle_create_admin(&pool, username, email).await
        }
        Commands::Seed {
            users,
            categories,
            genres,
            titles,
            reviews,
            comments,
        } => {
            let config = SeedConfig {
                users,
                categories,
                genres,
                titles,
                reviews_per_title: reviews,
                comments_per_review: comments,
            };
            seeder::seed_all(&pool, config).await
        }
        Commands::ClearSeed => seeder::clear_seed(&pool).await,
    }
}

async fn handle_create_admin(
    pool: &sqlx::PgPool,
    username: Option<String>,
    email: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let username = match username {
        Some(username) => username,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };

    match create_or_promote_admin(pool, &username, &email).await {
        Ok(id) => {
            println!("\n✅ Admin account ready (id {})", id);
            println!("   Username: {}", username);
            println!("   Email: {}", email);
            println!("   Request a confirmation code via POST /api/v1/auth/signup/ to sign in.");
            Ok(())
        }
        Err(e) => {
            eprintln!("\n❌ Error creating admin: {}", e);
            std::process::exit(1);
        }
    }
}
