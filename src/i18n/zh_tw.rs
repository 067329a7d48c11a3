//! Traditional Chinese translations

use std::collections::HashMap;

pub fn get_translations() -> HashMap<String, String> {
    let mut t = HashMap::new();

    // App general
    t.insert("app.title".into(), "\u{667A}\u{6167}\u{5BB6}\u{5EAD}\u{5100}\u{8868}\u{677F}".into());

    // Weekday categories for the weekly history
    t.insert("weekday.mon".into(), "\u{9031}\u{4E00}".into());
    t.insert("weekday.tue".into(), "\u{9031}\u{4E8C}".into());
    t.insert("weekday.wed".into(), "\u{9031}\u{4E09}".into());
    t.insert("weekday.thu".into(), "\u{9031}\u{56DB}".into());
    t.insert("weekday.fri".into(), "\u{9031}\u{4E94}".into());
    t.insert("weekday.sat".into(), "\u{9031}\u{516D}".into());
    t.insert("weekday.sun".into(), "\u{9031}\u{65E5}".into());

    // Monthly history
    t.insert("series.day".into(), "{day}\u{65E5}".into());
    t.insert("series.usage".into(), "\u{7528}\u{96FB}\u{91CF}".into());

    // Appliance status
    t.insert("status.running".into(), "\u{904B}\u{884C}\u{4E2D}".into());
    t.insert("status.off".into(), "\u{95DC}\u{9589}".into());
    t.insert("status.none_running".into(), "\u{7121}\u{8A2D}\u{5099}\u{904B}\u{884C}".into());

    // Dashboard
    t.insert("dashboard.current_power".into(), "\u{76EE}\u{524D}\u{8017}\u{96FB}".into());
    t.insert("dashboard.top_consumer".into(), "\u{6700}\u{8017}\u{96FB}\u{8A2D}\u{5099}".into());
    t.insert("dashboard.today_usage".into(), "\u{4ECA}\u{65E5}\u{7528}\u{96FB}".into());
    t.insert("dashboard.estimated_cost".into(), "\u{9810}\u{4F30}\u{8CBB}\u{7528}".into());
    t.insert("dashboard.online".into(), "\u{904B}\u{884C}\u{4E2D}".into());
    t.insert("dashboard.offline".into(), "\u{95DC}\u{9589}".into());
    t.insert("dashboard.total".into(), "\u{7E3D}\u{8A08}".into());

    // Peak usage
    t.insert("peak.title".into(), "\u{9AD8}\u{5CF0}\u{6642}\u{6BB5}".into());
    t.insert("peak.hour_range".into(), "{start}:00 - {end}:00".into());

    // Units
    t.insert("unit.watts".into(), "W".into());
    t.insert("unit.kilowatt_hours".into(), "kWh".into());

    t
}
