//! Wire-format conversion between the semester hierarchy and JSON
//!
//! Every node carries `name`, `confidence` (its uppercase label) and
//! `studyDates` (an array of `{year, month, day}` objects, most recent
//! first). Collections nest their children in a `materialMap` array; cards
//! carry an `answer` string instead. New documents are also tagged with a
//! `kind` discriminator, but readers accept legacy untagged documents and
//! recover each node's type from its nesting depth, so existing files stay
//! readable.

use chrono::{Datelike, NaiveDate};
use serde_json::{json, Map, Value};

use crate::study::{
    Card, ChildMaterial, Confidence, Course, Material, MaterialKind, Semester, StudyCollection,
    Topic,
};

use super::semester_store::{Result, StorageError};

pub(crate) fn semester_to_value(semester: &Semester) -> Value {
    collection_to_value(semester, course_to_value)
}

pub(crate) fn semester_from_value(value: &Value) -> Result<Semester> {
    collection_from_value(value, course_from_value)
}

fn course_to_value(course: &Course) -> Value {
    collection_to_value(course, topic_to_value)
}

fn course_from_value(value: &Value) -> Result<Course> {
    collection_from_value(value, topic_from_value)
}

fn topic_to_value(topic: &Topic) -> Value {
    collection_to_value(topic, card_to_value)
}

fn topic_from_value(value: &Value) -> Result<Topic> {
    collection_from_value(value, card_from_value)
}

fn card_to_value(card: &Card) -> Value {
    let mut obj = info_object(card);
    obj.insert("answer".to_string(), json!(card.answer()));
    Value::Object(obj)
}

/// Fields shared by every node: kind tag, name, confidence, study dates.
fn info_object<T: Material>(material: &T) -> Map<String, Value> {
    let dates: Vec<Value> = material
        .study_dates()
        .iter()
        .map(|d| json!({ "year": d.year(), "month": d.month(), "day": d.day() }))
        .collect();

    let mut obj = Map::new();
    obj.insert("kind".to_string(), json!(T::KIND));
    obj.insert("name".to_string(), json!(material.name()));
    obj.insert("confidence".to_string(), json!(material.confidence()));
    obj.insert("studyDates".to_string(), Value::Array(dates));
    obj
}

/// Children are written sorted by name so documents are deterministic.
fn collection_to_value<M, F>(sc: &StudyCollection<M>, child_to_value: F) -> Value
where
    M: ChildMaterial,
    F: Fn(&M) -> Value,
{
    let mut obj = info_object(sc);

    let mut names: Vec<&String> = sc.all().keys().collect();
    names.sort();
    let children: Vec<Value> = names
        .into_iter()
        .map(|name| child_to_value(&sc.all()[name]))
        .collect();

    obj.insert("materialMap".to_string(), Value::Array(children));
    Value::Object(obj)
}

fn collection_from_value<M, F>(value: &Value, child_from_value: F) -> Result<StudyCollection<M>>
where
    M: ChildMaterial,
    F: Fn(&Value) -> Result<M>,
{
    let kind = <StudyCollection<M> as Material>::KIND;
    let obj = as_object(value, kind)?;
    check_kind(obj, kind)?;

    let mut sc =
        StudyCollection::with_confidence(str_field(obj, "name")?, confidence_field(obj)?);
    sc.info_mut().set_study_dates(dates_field(obj)?);

    let children = obj
        .get("materialMap")
        .and_then(Value::as_array)
        .ok_or_else(|| StorageError::Malformed(format!("{kind} node has no materialMap")))?;
    for child in children {
        let material = child_from_value(child)?;
        sc.add(material)
            .map_err(|err| StorageError::Malformed(format!("duplicate sibling name: {err}")))?;
    }

    Ok(sc)
}

fn card_from_value(value: &Value) -> Result<Card> {
    let obj = as_object(value, MaterialKind::Card)?;
    check_kind(obj, MaterialKind::Card)?;
    if obj.contains_key("materialMap") {
        return Err(StorageError::Malformed(
            "unexpected materialMap on a card node".to_string(),
        ));
    }

    let mut card = Card::with_confidence(
        str_field(obj, "name")?,
        str_field(obj, "answer")?,
        confidence_field(obj)?,
    );
    card.info_mut().set_study_dates(dates_field(obj)?);
    Ok(card)
}

fn as_object(value: &Value, kind: MaterialKind) -> Result<&Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| StorageError::Malformed(format!("{kind} node is not an object")))
}

/// Legacy documents carry no `kind`; when one is present it must match the
/// depth it was found at.
fn check_kind(obj: &Map<String, Value>, expected: MaterialKind) -> Result<()> {
    let Some(value) = obj.get("kind") else {
        return Ok(());
    };
    let found: MaterialKind = serde_json::from_value(value.clone())
        .map_err(|_| StorageError::Malformed(format!("unrecognized kind {value}")))?;
    if found != expected {
        return Err(StorageError::Malformed(format!(
            "expected a {expected} at this depth, found a {found}"
        )));
    }
    Ok(())
}

fn str_field<'a>(obj: &'a Map<String, Value>, field: &str) -> Result<&'a str> {
    obj.get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| StorageError::Malformed(format!("missing string field '{field}'")))
}

fn confidence_field(obj: &Map<String, Value>) -> Result<Confidence> {
    let value = obj
        .get("confidence")
        .ok_or_else(|| StorageError::Malformed("missing field 'confidence'".to_string()))?;
    serde_json::from_value(value.clone())
        .map_err(|_| StorageError::Malformed(format!("unknown confidence label {value}")))
}

fn dates_field(obj: &Map<String, Value>) -> Result<Vec<NaiveDate>> {
    let array = obj
        .get("studyDates")
        .and_then(Value::as_array)
        .ok_or_else(|| StorageError::Malformed("missing field 'studyDates'".to_string()))?;
    if array.is_empty() {
        return Err(StorageError::Malformed(
            "studyDates must not be empty".to_string(),
        ));
    }
    array.iter().map(date_from_value).collect()
}

fn date_from_value(value: &Value) -> Result<NaiveDate> {
    let obj = value
        .as_object()
        .ok_or_else(|| StorageError::Malformed("study date is not an object".to_string()))?;
    let year = int_field(obj, "year")?;
    let month = int_field(obj, "month")?;
    let day = int_field(obj, "day")?;

    let date = match (i32::try_from(year), u32::try_from(month), u32::try_from(day)) {
        (Ok(y), Ok(m), Ok(d)) => NaiveDate::from_ymd_opt(y, m, d),
        _ => None,
    };
    date.ok_or_else(|| {
        StorageError::Malformed(format!("invalid calendar date {year}-{month}-{day}"))
    })
}

fn int_field(obj: &Map<String, Value>, field: &str) -> Result<i64> {
    obj.get(field)
        .and_then(Value::as_i64)
        .ok_or_else(|| StorageError::Malformed(format!("missing integer field '{field}'")))
}
