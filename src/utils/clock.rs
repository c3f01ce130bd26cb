use chrono::{NaiveDateTime, Utc};
use chrono_tz::Tz;
use tracing::warn;

/// Wall-clock source for date stamps. Swapped for a fixed clock in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// 按配置时区给出本地时间
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// 时区名非法时回退到 UTC
    pub fn from_name(name: &str) -> Self {
        match name.parse::<Tz>() {
            Ok(tz) => Self::new(tz),
            Err(e) => {
                warn!("Unknown timezone {:?} ({}). Falling back to UTC.", name, e);
                Self::new(Tz::UTC)
            }
        }
    }

    #[cfg(test)]
    pub fn tz(&self) -> Tz {
        self.tz
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.tz).naive_local()
    }
}

#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_configured_zone() {
        assert_eq!(SystemClock::from_name("America/New_York").tz(), chrono_tz::America::New_York);
    }

    #[test]
    fn bad_zone_falls_back_to_utc() {
        assert_eq!(SystemClock::from_name("Mars/Olympus_Mons").tz(), Tz::UTC);
    }
}
