use chrono::Utc;
use fuelwatch_core::report::utc_timestamp_label;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", utc_timestamp_label(Utc::now()));
    Ok(())
}
