//! Storefront Session Example
//!
//! This example walks one shopper through the juice bar: adding and removing drinks, typing
//! searches into the debounced search box and signing up for the newsletter.
//!
//! Use `-f` to load a catalog fixture by name instead of the built-in menu
//! Use `-c` to load a session config YAML file
//! Use `-s` to choose the search queries to type

use std::{
    io::{self, Write},
    time::{Duration, Instant},
};

use anyhow::Result;
use clap::Parser;
use humanize_duration::{Truncate, prelude::DurationExt};

use pulp::{
    catalog::Catalog,
    config::SessionConfig,
    fixtures::Fixture,
    products::ProductId,
    receipt::Receipt,
    session::{Scheduled, Session},
    utils::{ExampleSessionArgs, init_logging},
};

const KEYSTROKE: Duration = Duration::from_millis(80);

/// Storefront Session Example
#[expect(clippy::print_stdout, reason = "Example program output to user")]
pub fn main() -> Result<()> {
    let args = ExampleSessionArgs::parse();

    init_logging(&args.log_level, args.log_format)?;

    let catalog = match args.fixture.as_deref() {
        Some(name) => Fixture::new().catalog(name)?,
        None => Catalog::seed()?,
    };

    let config = match args.config.as_deref() {
        Some(path) => SessionConfig::from_path(path)?,
        None => SessionConfig::default(),
    };

    let mut session = Session::new(&catalog, config)?;

    let first = catalog.iter().next().map(|product| product.id);
    let last = catalog.iter().last().map(|product| product.id);

    if let Some(id) = first {
        session.add_item(id, 2)?;
        session.add_item(id, 1)?;
    }

    if let Some(id) = last {
        session.add_item(id, 25)?;
    }

    if session.add_item(ProductId::new(u32::MAX), 1).is_err() {
        println!("Skipped an unknown product");
    }

    if let Some(id) = last {
        session.remove_item(id);
    }

    let window = session.config().search_debounce();
    let mut now = Instant::now();

    for query in &args.search {
        let mut typed = String::new();

        for ch in query.chars() {
            typed.push(ch);

            if let Scheduled::Pending(handle) = session.schedule_search(&typed, now) {
                println!("Typed {typed:?}, search pending as {handle:?}");
            }

            now += KEYSTROKE;
        }

        now += window;

        if let Some(outcome) = session.poll_search(now) {
            let names: Vec<&str> = outcome
                .products()
                .iter()
                .map(|product| product.name.as_str())
                .collect();

            println!("Search {query:?} after {}: {names:?}", window.human(Truncate::Nano));
        }
    }

    if let Some(id) = first {
        session.select_result(id)?;
    }

    session.submit_search("");

    if session.subscribe("not-an-email").is_err() {
        println!("Rejected a malformed newsletter address");
    }

    session.subscribe("fan@juice.example")?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    writeln!(handle)?;

    for notice in session.drain_notices() {
        writeln!(handle, " {notice}")?;
    }

    Receipt::from_cart(session.cart())?.write_to(&mut handle)?;

    Ok(())
}
