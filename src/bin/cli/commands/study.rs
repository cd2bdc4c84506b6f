use anyhow::Result;
use chrono::NaiveDate;

use cram::study::Confidence;

use crate::app::{node_at, node_at_mut, track_study_node, App};

pub fn run(
    app: &App,
    semester_name: &str,
    path: &[String],
    confidence: Confidence,
    date: Option<NaiveDate>,
) -> Result<()> {
    let mut semester = app.load_semester(semester_name)?;
    let name = node_at(&semester, path)?.name().to_string();

    let node = node_at_mut(&mut semester, path)?;
    track_study_node(node, date, confidence);
    println!("\"{}\" has been studied at {}.", name, confidence);

    app.save(&semester)
}
