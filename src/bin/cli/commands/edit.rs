use anyhow::{bail, Result};

use cram::study::{Card, Confidence, Material, Semester};

use crate::app::{collection_at_mut, resolve_name, App, CollectionMut};

pub fn run_new(app: &App, name: &str) -> Result<()> {
    let semester = Semester::new(name);
    if semester.name().is_empty() {
        bail!("semester name must not be empty");
    }
    if app.store.exists(semester.name()) {
        bail!("semester '{}' already exists", semester.name());
    }

    app.save(&semester)?;
    println!(
        "Created semester \"{}\" at {}",
        semester.name(),
        app.store.path_for(semester.name()).display()
    );
    Ok(())
}

pub fn run_add(
    app: &App,
    semester_name: &str,
    path: &[String],
    answer: Option<&str>,
    confidence: Option<Confidence>,
) -> Result<()> {
    let Some((name, parent_path)) = path.split_last() else {
        bail!("give the name to add, e.g. 'add ubc Biology'");
    };

    let mut semester = app.load_semester(semester_name)?;
    let mut parent = collection_at_mut(&mut semester, parent_path)?;
    let parent_name = parent.name().to_string();
    let child_kind = parent.child_kind();

    match &mut parent {
        CollectionMut::Topic(topic) => {
            let card = Card::with_confidence(
                name,
                answer.unwrap_or(""),
                confidence.unwrap_or_default(),
            );
            let question = card.question().to_string();
            topic.add(card)?;
            println!("Added card \"{}\" to topic \"{}\".", question, parent_name);
        }
        CollectionMut::Semester(semester) => {
            if answer.is_some() {
                bail!("--answer only applies when adding a card under a topic");
            }
            semester.create(name, confidence.unwrap_or_default())?;
            println!("Added {} \"{}\" to \"{}\".", child_kind, name, parent_name);
        }
        CollectionMut::Course(course) => {
            if answer.is_some() {
                bail!("--answer only applies when adding a card under a topic");
            }
            course.create(name, confidence.unwrap_or_default())?;
            println!("Added {} \"{}\" to \"{}\".", child_kind, name, parent_name);
        }
    }

    app.save(&semester)
}

pub fn run_remove(app: &App, semester_name: &str, path: &[String]) -> Result<()> {
    let Some((target, parent_path)) = path.split_last() else {
        bail!("give the name to remove, e.g. 'remove ubc Biology'");
    };

    let mut semester = app.load_semester(semester_name)?;
    let mut parent = collection_at_mut(&mut semester, parent_path)?;
    let name = parent.resolve(target)?;
    parent.remove_child(&name)?;
    let parent_name = parent.name().to_string();
    println!("Removed \"{}\" from \"{}\".", name, parent_name);

    app.save(&semester)
}

pub fn run_rename(app: &App, semester_name: &str, path: &[String], to: &str) -> Result<()> {
    let Some((target, parent_path)) = path.split_last() else {
        bail!("give the name to rename, e.g. 'rename ubc Biology --to Bio'");
    };

    let mut semester = app.load_semester(semester_name)?;
    let mut parent = collection_at_mut(&mut semester, parent_path)?;
    let name = parent.resolve(target)?;
    parent.rename_child(&name, to)?;
    println!("Changed the name from \"{}\" to \"{}\".", name, to);

    app.save(&semester)
}

pub fn run_answer(app: &App, semester_name: &str, path: &[String], text: &str) -> Result<()> {
    let Some((question, parent_path)) = path.split_last() else {
        bail!("give the path to a card, e.g. 'answer ubc bio cells \"What is DNA?\" --text ...'");
    };

    let mut semester = app.load_semester(semester_name)?;
    let CollectionMut::Topic(topic) = collection_at_mut(&mut semester, parent_path)? else {
        bail!("only cards have answers; the path must end at a card inside a topic");
    };

    let question = resolve_name(question, topic.all().keys().map(String::as_str), "card")?;
    topic.edit_card_answer(&question, text)?;
    println!("Updated the answer of \"{}\".", question);

    app.save(&semester)
}
