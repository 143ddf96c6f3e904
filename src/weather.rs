//! Simulated weather. Nothing here talks to a real data source.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const HOURS: usize = 24;

const HOUR_ICONS: [&str; 4] = ["☀️", "⛅", "🌧️", "☁️"];

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temp_c: i32,
    pub description: &'static str,
    pub humidity_pct: u8,
    pub wind_kmh: u16,
    pub pressure_hpa: u16,
    pub visibility_km: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlyPoint {
    pub time: String,
    pub temp_c: i32,
    pub icon: &'static str,
    pub description: &'static str,
}

/// Side cards shown under the forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct Extras {
    pub sunrise: &'static str,
    pub sunset: &'static str,
    pub uv_index: u8,
    pub aqi: u16,
    pub air_quality: &'static str,
    pub moon_phase: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub location: String,
    pub updated_at: String,
    pub date: NaiveDate,
    pub current: CurrentConditions,
    pub hours: Vec<HourlyPoint>,
    pub extras: Extras,
}

/// Anything that can hand out a full snapshot for a place and time.
pub trait SnapshotSource {
    fn generate(&mut self, location: &str, now: NaiveDateTime) -> WeatherSnapshot;
}

/// Random mock data. Seed it for repeatable output.
#[derive(Debug)]
pub struct RandomWeather<R = StdRng> {
    rng: R,
}

impl RandomWeather<StdRng> {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl<R: Rng> SnapshotSource for RandomWeather<R> {
    fn generate(&mut self, location: &str, now: NaiveDateTime) -> WeatherSnapshot {
        let temp_c = self.rng.gen_range(24..32);
        let current = CurrentConditions {
            temp_c,
            description: describe(temp_c),
            humidity_pct: self.rng.gen_range(60..80),
            wind_kmh: self.rng.gen_range(10..20),
            pressure_hpa: self.rng.gen_range(1005..1015),
            visibility_km: self.rng.gen_range(8..11),
        };

        let hours = (0..HOURS)
            .map(|i| {
                let icon = HOUR_ICONS[i % HOUR_ICONS.len()];
                HourlyPoint {
                    time: format!("{i:02}:00"),
                    temp_c: temp_c - 2 + ((i as f64 / 3.0).sin() * 2.0).round() as i32,
                    icon,
                    description: icon_desc(icon),
                }
            })
            .collect();

        let extras = Extras {
            sunrise: "06:15",
            sunset: "18:35",
            uv_index: self.rng.gen_range(0..10),
            aqi: self.rng.gen_range(30..70),
            air_quality: "Buena",
            moon_phase: "🌔 Cuarto creciente",
        };

        WeatherSnapshot {
            location: location.to_string(),
            updated_at: format_updated_at(now),
            date: now.date(),
            current,
            hours,
            extras,
        }
    }
}

/// Condition label for a current temperature.
pub fn describe(temp_c: i32) -> &'static str {
    if temp_c > 30 {
        "Soleado"
    } else if temp_c > 27 {
        "Parcialmente nublado"
    } else {
        "Lluvia ligera"
    }
}

fn icon_desc(icon: &str) -> &'static str {
    match icon {
        "☀️" => "Despejado",
        "⛅" => "Parcialmente nublado",
        "🌧️" => "Lluvia ligera",
        _ => "Nublado",
    }
}

fn weekday_es(d: Weekday) -> &'static str {
    match d {
        Weekday::Mon => "lunes",
        Weekday::Tue => "martes",
        Weekday::Wed => "miércoles",
        Weekday::Thu => "jueves",
        Weekday::Fri => "viernes",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Long Spanish date plus short time, e.g. `viernes, 16 de octubre de 2026, 14:05`.
pub fn format_updated_at(t: NaiveDateTime) -> String {
    format!(
        "{}, {} de {} de {}, {:02}:{:02}",
        weekday_es(t.weekday()),
        t.day(),
        MONTHS_ES[t.month0() as usize],
        t.year(),
        t.hour(),
        t.minute()
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TempUnit {
    #[default]
    C,
    F,
}

impl TempUnit {
    pub fn toggle(self) -> Self {
        match self {
            TempUnit::C => TempUnit::F,
            TempUnit::F => TempUnit::C,
        }
    }
}

pub fn format_temp(c: i32, unit: TempUnit) -> String {
    match unit {
        TempUnit::C => format!("{c}°C"),
        TempUnit::F => format!("{:.0}°F", f64::from(c) * 9.0 / 5.0 + 32.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn snapshot_has_full_shape() {
        let mut w = RandomWeather::new(Some(7));
        for _ in 0..50 {
            let s = w.generate("Morelia", at(2026, 10, 16, 14, 5));
            assert_eq!(s.location, "Morelia");
            assert_eq!(s.hours.len(), HOURS);
            assert!((24..32).contains(&s.current.temp_c));
            assert_eq!(s.current.description, describe(s.current.temp_c));
            assert!((60..80).contains(&s.current.humidity_pct));
            assert!((10..20).contains(&s.current.wind_kmh));
            assert!((1005..1015).contains(&s.current.pressure_hpa));
            assert!((8..11).contains(&s.current.visibility_km));
            assert!(s.extras.uv_index < 10);
            assert!((30..70).contains(&s.extras.aqi));
            for h in &s.hours {
                assert!(!h.time.is_empty() && !h.icon.is_empty() && !h.description.is_empty());
                assert!((s.current.temp_c - 4..=s.current.temp_c).contains(&h.temp_c));
            }
        }
    }

    #[test]
    fn hours_are_labelled_in_order() {
        let s = RandomWeather::new(Some(1)).generate("X", at(2026, 1, 1, 0, 0));
        assert_eq!(s.hours[0].time, "00:00");
        assert_eq!(s.hours[9].time, "09:00");
        assert_eq!(s.hours[23].time, "23:00");
        assert_eq!(s.hours[0].description, "Despejado");
        assert_eq!(s.hours[2].description, "Lluvia ligera");
        assert_eq!(s.hours[3].description, "Nublado");
        assert_eq!(s.hours[0].temp_c, s.current.temp_c - 2);
    }

    #[test]
    fn same_seed_same_snapshot() {
        let now = at(2026, 10, 16, 14, 5);
        let a = RandomWeather::new(Some(42)).generate("León", now);
        let b = RandomWeather::new(Some(42)).generate("León", now);
        assert_eq!(a, b);
    }

    #[test]
    fn description_thresholds() {
        assert_eq!(describe(31), "Soleado");
        assert_eq!(describe(30), "Parcialmente nublado");
        assert_eq!(describe(28), "Parcialmente nublado");
        assert_eq!(describe(27), "Lluvia ligera");
        assert_eq!(describe(24), "Lluvia ligera");
    }

    #[test]
    fn spanish_timestamp() {
        let s = RandomWeather::new(Some(3)).generate("X", at(2026, 10, 16, 14, 5));
        assert_eq!(s.updated_at, "viernes, 16 de octubre de 2026, 14:05");
        assert_eq!(s.date.to_string(), "2026-10-16");
        assert_eq!(
            format_updated_at(at(2027, 2, 7, 8, 0)),
            "domingo, 7 de febrero de 2027, 08:00"
        );
    }

    #[test]
    fn temperature_units() {
        assert_eq!(format_temp(25, TempUnit::C), "25°C");
        assert_eq!(format_temp(25, TempUnit::F), "77°F");
        assert_eq!(TempUnit::C.toggle(), TempUnit::F);
        assert_eq!(TempUnit::F.toggle(), TempUnit::C);
    }
}
