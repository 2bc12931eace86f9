use anyhow::Result;
use geom::Duration;

pub const DEFAULT_ORIGIN_CITY: &str = "North Pole";
pub const DEFAULT_ORIGIN_LABEL: &str = "Santa's Workshop";

#[derive(Clone, Debug)]
pub struct AnimatorConfig {
    /// How long every leg between two stops takes, no matter the distance
    pub segment_duration: Duration,
    /// If false, the animator starts stopped and has to be resumed
    pub looping: bool,
    /// Legs leaving a stop with this city name are described as departures
    pub origin_city: String,
    /// How departures refer to the origin
    pub origin_label: String,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            segment_duration: Duration::seconds(5.0),
            looping: true,
            origin_city: DEFAULT_ORIGIN_CITY.to_string(),
            origin_label: DEFAULT_ORIGIN_LABEL.to_string(),
        }
    }
}

impl AnimatorConfig {
    pub fn with_segment_secs(mut self, secs: f64) -> Result<Self> {
        if !secs.is_finite() || secs <= 0.0 {
            bail!("Each leg must take a positive number of seconds, not {secs}");
        }
        self.segment_duration = Duration::seconds(secs);
        Ok(self)
    }

    pub fn with_origin_city<S: Into<String>>(mut self, city: S) -> Self {
        self.origin_city = city.into();
        self
    }
}
