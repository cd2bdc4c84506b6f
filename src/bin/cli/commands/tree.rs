use anyhow::Result;

use cram::study::{Material, StudyCollection};

use crate::app::App;

pub fn run(app: &App, semester_name: &str) -> Result<()> {
    let semester = app.load_semester(semester_name)?;
    println!("{} ({} cards)", semester.name(), semester.count_cards());

    let courses = sorted_names(&semester);
    for (i, course_name) in courses.iter().enumerate() {
        let is_last = i + 1 == courses.len();
        let course = &semester.all()[course_name];
        println!(
            "{}{} ({} cards)",
            connector(is_last),
            course_name,
            course.count_cards()
        );

        let topic_prefix = child_prefix("", is_last);
        let topics = sorted_names(course);
        for (j, topic_name) in topics.iter().enumerate() {
            let topic_is_last = j + 1 == topics.len();
            let topic = &course.all()[topic_name];
            println!(
                "{}{}{} ({} cards)",
                topic_prefix,
                connector(topic_is_last),
                topic_name,
                topic.count_cards()
            );

            let card_prefix = child_prefix(&topic_prefix, topic_is_last);
            let cards = sorted_names(topic);
            for (k, question) in cards.iter().enumerate() {
                let card_is_last = k + 1 == cards.len();
                println!("{}{}{}", card_prefix, connector(card_is_last), question);
            }
        }
    }

    Ok(())
}

fn sorted_names<M>(sc: &StudyCollection<M>) -> Vec<String> {
    let mut names: Vec<String> = sc.all().keys().cloned().collect();
    names.sort();
    names
}

fn connector(is_last: bool) -> &'static str {
    if is_last {
        "\u{2514}\u{2500}\u{2500} "
    } else {
        "\u{251c}\u{2500}\u{2500} "
    }
}

fn child_prefix(prefix: &str, is_last: bool) -> String {
    format!(
        "{}{}",
        prefix,
        if is_last { "    " } else { "\u{2502}   " }
    )
}
