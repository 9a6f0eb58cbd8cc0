//! Simple example: build a few validated values and render them as JSON.
//!
//! Run with: cargo run --example simple

use chrono::{FixedOffset, TimeZone, Utc};
use czml_types::{
    format_datetime_like, to_string, to_string_pretty, AstroTime, Cartesian3Value, RgbaValue,
    TimeInterval, Uri,
};

fn main() -> czml_types::Result<()> {
    println!("=== czml_types ===\n");

    let position = Cartesian3Value::new(vec![
        0.0, 1_216_000.0, -4_736_000.0, 4_081_000.0, //
        60.0, 1_217_000.0, -4_735_000.0, 4_082_000.0,
    ])?;
    println!("Position:\n{}\n", to_string_pretty(&position)?);

    let tz = FixedOffset::east_opt(2 * 3600).expect("valid offset");
    let start = Utc.with_ymd_and_hms(2019, 1, 1, 12, 0, 0).unwrap();
    let end = tz.with_ymd_and_hms(2019, 9, 2, 23, 59, 59).unwrap();
    let availability = TimeInterval::always().with_start(start)?.with_end(end)?;
    println!("Availability: {availability}");
    println!("Always:       {}\n", TimeInterval::always());

    let epoch = AstroTime::from_iso("2012-03-15T10:16:06.97400000000198Z")?;
    println!("Epoch: {}", format_datetime_like(epoch)?);

    let color = RgbaValue::from_rgba(255, 255, 0, 255);
    println!("Color: {}", to_string(&color)?);

    match Uri::new("a") {
        Ok(uri) => println!("Unexpectedly valid: {uri}"),
        Err(err) => println!("Rejected uri: {err}"),
    }

    Ok(())
}
