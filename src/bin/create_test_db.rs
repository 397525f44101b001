use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use rust_decimal::Decimal;
use time::Duration;

use weekly_dashboard::{
    CategoryTitle, CategoryType, Transaction, count_transactions, create_category,
    create_transaction, get_all_categories, initialize_db, today_in,
};

/// A utility for creating a test database for the weekly dashboard server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// How many days of transactions to generate, ending today.
    #[arg(
        long,
        short,
        default_value_t = 28,
        value_parser = clap::value_parser!(i64).range(1..=366),
    )]
    days: i64,

    /// The canonical timezone name used to decide what "today" is, e.g. "Africa/Johannesburg".
    #[arg(long, env = "TIMEZONE", default_value = "Africa/Johannesburg")]
    timezone: String,
}

/// Title, icon and type for each sample category.
const SAMPLE_CATEGORIES: [(&str, &str, &str); 6] = [
    ("Salary", "💼", CategoryType::INCOME),
    ("Freelance", "💻", CategoryType::INCOME),
    ("Groceries", "🛒", CategoryType::EXPENSE),
    ("Transport", "🚌", CategoryType::EXPENSE),
    ("Eating Out", "🍔", CategoryType::EXPENSE),
    ("Utilities", "💡", CategoryType::EXPENSE),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating categories...");
    for (title, icon, category_type) in SAMPLE_CATEGORIES {
        create_category(
            CategoryTitle::new(title)?,
            icon,
            CategoryType::from_raw(category_type),
            &conn,
        )?;
    }
    let categories = get_all_categories(&conn)?;
    let find = |title: &str| {
        categories
            .iter()
            .find(|category| category.title.as_ref() == title)
            .ok_or_else(|| format!("missing sample category {title}"))
    };
    let salary = find("Salary")?;
    let freelance = find("Freelance")?;
    let groceries = find("Groceries")?;
    let transport = find("Transport")?;
    let eating_out = find("Eating Out")?;
    let utilities = find("Utilities")?;

    println!("Creating transactions...");
    let today = today_in(&args.timezone)?;
    for days_ago in (0..args.days).rev() {
        let date = today - Duration::days(days_ago);

        // Weekday commute and a few groceries every other day.
        if date.weekday().number_from_monday() <= 5 {
            let fare = Decimal::new(2450 + days_ago % 3 * 150, 2);
            create_transaction(
                Transaction::build(fare, date, transport.id).note("Bus fare"),
                &conn,
            )?;
        }

        if days_ago % 2 == 0 {
            let amount = Decimal::new(18_000 + days_ago * 1_337 % 25_000, 2);
            create_transaction(Transaction::build(amount, date, groceries.id), &conn)?;
        }

        if days_ago % 5 == 3 {
            let amount = Decimal::new(9_500 + days_ago * 733 % 12_000, 2);
            create_transaction(
                Transaction::build(amount, date, eating_out.id).note("Dinner"),
                &conn,
            )?;
        }

        if days_ago % 14 == 0 {
            create_transaction(
                Transaction::build(Decimal::new(1_850_000, 2), date, salary.id)
                    .note("Fortnightly pay"),
                &conn,
            )?;
        }

        if days_ago % 9 == 4 {
            create_transaction(
                Transaction::build(Decimal::new(320_000, 2), date, freelance.id),
                &conn,
            )?;
        }

        if date.day() == 1 {
            create_transaction(
                Transaction::build(Decimal::new(145_000, 2), date, utilities.id)
                    .note("Electricity and water"),
                &conn,
            )?;
        }
    }

    println!(
        "Created {} categories and {} transactions.",
        categories.len(),
        count_transactions(&conn)?
    );
    println!("Success!");

    Ok(())
}
