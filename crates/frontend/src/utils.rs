//! Small helpers shared by forms and views

use chrono::{DateTime, Local, NaiveDate, Utc};
use gloo::file::File;
use midart_core::Upload;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

pub fn input_value(event: &InputEvent) -> String {
    let input: HtmlInputElement = event.target_unchecked_into();
    input.value()
}

pub fn textarea_value(event: &InputEvent) -> String {
    let input: HtmlTextAreaElement = event.target_unchecked_into();
    input.value()
}

pub fn select_value(event: &Event) -> String {
    let select: HtmlSelectElement = event.target_unchecked_into();
    select.value()
}

pub fn checkbox_checked(event: &Event) -> bool {
    let input: HtmlInputElement = event.target_unchecked_into();
    input.checked()
}

/// First file picked in an `<input type="file">`
pub fn selected_file(event: &Event) -> Option<web_sys::File> {
    let input: HtmlInputElement = event.target_unchecked_into();
    input.files()?.get(0)
}

/// Read a picked file into memory for a multipart upload
pub async fn read_upload(file: web_sys::File) -> Result<Upload, String> {
    let file = File::from(file);
    let bytes = gloo::file::futures::read_as_bytes(&file)
        .await
        .map_err(|err| format!("Could not read {}: {err}", file.name()))?;

    Ok(Upload {
        file_name: file.name(),
        mime: file.raw_mime_type(),
        bytes,
    })
}

/// Today in the browser's time zone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `<input type="date">` value; empty or malformed input is `None`
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub fn date_input_value(date: Option<NaiveDate>) -> String {
    date.map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%b %-d, %Y %H:%M")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_inputs() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(parse_date("2025-03-09"), Some(date));
        assert_eq!(parse_date(" "), None);
        assert_eq!(parse_date("09/03/2025"), None);
        assert_eq!(date_input_value(Some(date)), "2025-03-09");
        assert_eq!(date_input_value(None), "");
        assert_eq!(format_date(date), "Mar 9, 2025");
    }
}
