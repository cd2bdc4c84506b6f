use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use rand::seq::SliceRandom;

use cram::study::{Card, Confidence, Material};

use crate::app::{node_at_mut, track_study_node, walk, App, Node, NodeMut};

struct QuizCard {
    /// Exact path from the semester root to the card.
    path: Vec<String>,
    question: String,
    answer: String,
    confidence: Confidence,
}

pub fn run(app: &App, semester_name: &str, path: &[String]) -> Result<()> {
    let mut semester = app.load_semester(semester_name)?;

    let (target_name, mut cards) = {
        let (node, exact) = walk(&semester, path)?;
        (node.name().to_string(), collect_cards(node, &exact))
    };

    if cards.is_empty() {
        println!("There are no cards to study in \"{}\".", target_name);
        return Ok(());
    }

    cards.shuffle(&mut rand::thread_rng());

    println!(
        "\"{}\" has {} card(s). Press Enter to reveal each answer, enter q to stop.",
        target_name,
        cards.len()
    );

    let stdin = io::stdin();
    let mut quizzed = 0;
    for card in &cards {
        println!();
        println!("Q: {}", card.question);
        if read_line(&stdin)?.eq_ignore_ascii_case("q") {
            println!("Testing stopped.");
            break;
        }
        println!("A: {}", card.answer);
        println!("Your previous confidence was {}.", card.confidence);

        let confidence = prompt_confidence(&stdin)?;
        let NodeMut::Card(stored) = node_at_mut(&mut semester, &card.path)? else {
            bail!("card \"{}\" is gone", card.question);
        };
        stored.track_study(confidence);
        println!("\"{}\" has been studied.", card.question);
        quizzed += 1;
    }

    if quizzed > 0 {
        println!();
        println!("How confident are you with \"{}\" overall?", target_name);
        let confidence = prompt_confidence(&stdin)?;
        track_study_node(node_at_mut(&mut semester, path)?, None, confidence);
    }

    app.save(&semester)
}

/// Flattens every card under the node into quiz entries carrying the exact
/// path needed to record the result.
fn collect_cards(node: Node<'_>, exact: &[String]) -> Vec<QuizCard> {
    let mut cards = Vec::new();
    let mut push = |path: Vec<String>, card: &Card| {
        cards.push(QuizCard {
            path,
            question: card.question().to_string(),
            answer: card.answer().to_string(),
            confidence: card.confidence(),
        });
    };

    match node {
        Node::Semester(semester) => {
            for (course_name, course) in semester.all() {
                for (topic_name, topic) in course.all() {
                    for (question, card) in topic.all() {
                        push(
                            vec![course_name.clone(), topic_name.clone(), question.clone()],
                            card,
                        );
                    }
                }
            }
        }
        Node::Course(course) => {
            for (topic_name, topic) in course.all() {
                for (question, card) in topic.all() {
                    let mut path = exact.to_vec();
                    path.push(topic_name.clone());
                    path.push(question.clone());
                    push(path, card);
                }
            }
        }
        Node::Topic(topic) => {
            for (question, card) in topic.all() {
                let mut path = exact.to_vec();
                path.push(question.clone());
                push(path, card);
            }
        }
        Node::Card(card) => push(exact.to_vec(), card),
    }

    cards
}

fn read_line(stdin: &io::Stdin) -> Result<String> {
    io::stdout().flush()?;
    let mut line = String::new();
    if stdin.lock().read_line(&mut line)? == 0 {
        bail!("input closed");
    }
    Ok(line.trim().to_string())
}

fn prompt_confidence(stdin: &io::Stdin) -> Result<Confidence> {
    println!("Enter a number: 0-None, 1-Low, 2-Medium, or 3-High");
    loop {
        match read_line(stdin)?.parse::<Confidence>() {
            Ok(confidence) => return Ok(confidence),
            Err(_) => println!("Invalid input. You must enter a number from 0-3."),
        }
    }
}
