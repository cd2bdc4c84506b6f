use anyhow::Result;

use cram::study::Material;

use crate::app::{node_at, App, Node};

pub fn run(app: &App, semester_name: &str, path: &[String]) -> Result<()> {
    let semester = app.load_semester(semester_name)?;
    let node = node_at(&semester, path)?;

    println!("{}: {}", node.kind(), node.name());
    println!("  confidence:    {}", node.confidence());
    println!("  times studied: {}", node.times_studied());
    println!(
        "  last studied:  {} ({} day(s) ago)",
        node.last_studied().format("%Y-%m-%d"),
        node.days_since_studied()
    );

    match node {
        Node::Card(card) => {
            println!("  question:      {}", card.question());
            println!("  answer:        {}", card.answer());
        }
        _ => println!("  cards below:   {}", node.count_cards()),
    }

    Ok(())
}

pub fn run_cards(app: &App, semester_name: &str, path: &[String]) -> Result<()> {
    let semester = app.load_semester(semester_name)?;
    let node = node_at(&semester, path)?;

    let cards = node.cards();
    println!("{} card(s) under \"{}\"", cards.len(), node.name());
    for card in cards {
        println!("  {} [{}]", card.question(), card.confidence());
    }

    Ok(())
}
