//! English translations

use std::collections::HashMap;

pub fn get_translations() -> HashMap<String, String> {
    let mut t = HashMap::new();

    // App general
    t.insert("app.title".into(), "Appliance Monitor".into());

    // Weekday categories for the weekly history
    t.insert("weekday.mon".into(), "Mon".into());
    t.insert("weekday.tue".into(), "Tue".into());
    t.insert("weekday.wed".into(), "Wed".into());
    t.insert("weekday.thu".into(), "Thu".into());
    t.insert("weekday.fri".into(), "Fri".into());
    t.insert("weekday.sat".into(), "Sat".into());
    t.insert("weekday.sun".into(), "Sun".into());

    // Monthly history
    t.insert("series.day".into(), "Day {day}".into());
    t.insert("series.usage".into(), "Usage".into());

    // Appliance status
    t.insert("status.running".into(), "Running".into());
    t.insert("status.off".into(), "Off".into());
    t.insert("status.none_running".into(), "No appliance running".into());

    // Dashboard
    t.insert("dashboard.current_power".into(), "Current Power".into());
    t.insert("dashboard.top_consumer".into(), "Top Consumer".into());
    t.insert("dashboard.today_usage".into(), "Today's Usage".into());
    t.insert("dashboard.estimated_cost".into(), "Estimated Cost".into());
    t.insert("dashboard.online".into(), "Online".into());
    t.insert("dashboard.offline".into(), "Offline".into());
    t.insert("dashboard.total".into(), "Total".into());

    // Peak usage
    t.insert("peak.title".into(), "Peak Hour".into());
    t.insert("peak.hour_range".into(), "{start}:00 - {end}:00".into());

    // Units
    t.insert("unit.watts".into(), "W".into());
    t.insert("unit.kilowatt_hours".into(), "kWh".into());

    t
}
