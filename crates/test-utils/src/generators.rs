//! Synthetic data generators.
//!
//! [`Grib2Builder`] emits structurally valid GRIB2 messages (sections 0-8,
//! lat/lon grid, simple packing) small enough to build inside a test.

/// Build a minimal GRIB2 message with the specified parameters
#[derive(Debug, Clone)]
pub struct Grib2Builder {
    discipline: u8,
    center: u16,
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    // Grid definition
    ni: u32,
    nj: u32,
    la1: i32, // microdegrees
    lo1: i32,
    la2: i32,
    lo2: i32,
    di: u32,
    dj: u32,
    // Product definition
    param_category: u8,
    param_number: u8,
    level_type: u8,
    level_value: u32,
    values: Vec<f32>,
}

impl Default for Grib2Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Grib2Builder {
    /// 2 m temperature on a 4x4 one-degree grid.
    pub fn new() -> Self {
        let (ni, nj) = (4, 4);
        Self {
            discipline: 0,
            center: 74, // UK Met Office
            year: 2020,
            month: 1,
            day: 1,
            hour: 0,
            ni,
            nj,
            la1: 53_000_000,
            lo1: 0,
            la2: 50_000_000,
            lo2: 3_000_000,
            di: 1_000_000,
            dj: 1_000_000,
            param_category: 0,
            param_number: 0,
            level_type: 103, // m above ground
            level_value: 2,
            values: vec![288.15; (ni * nj) as usize],
        }
    }

    pub fn with_discipline(mut self, discipline: u8) -> Self {
        self.discipline = discipline;
        self
    }

    pub fn with_parameter(mut self, category: u8, number: u8) -> Self {
        self.param_category = category;
        self.param_number = number;
        self
    }

    pub fn with_level(mut self, level_type: u8, level_value: u32) -> Self {
        self.level_type = level_type;
        self.level_value = level_value;
        self
    }

    pub fn with_reference_time(mut self, year: u16, month: u8, day: u8, hour: u8) -> Self {
        self.year = year;
        self.month = month;
        self.day = day;
        self.hour = hour;
        self
    }

    pub fn with_gradient(mut self, min_val: f32, max_val: f32) -> Self {
        let n = (self.ni * self.nj) as usize;
        self.values = (0..n)
            .map(|i| min_val + (max_val - min_val) * (i as f32 / n as f32))
            .collect();
        self
    }

    /// Build the complete GRIB2 message bytes
    pub fn build(&self) -> Vec<u8> {
        let sections = [
            self.build_section1(),
            self.build_section3(),
            self.build_section4(),
            self.build_section5(),
            self.build_section6(),
            self.build_section7(),
        ];
        let body_len: usize = sections.iter().map(Vec::len).sum();
        let message_length = 16 + body_len + 4;

        let mut message = Vec::with_capacity(message_length);

        // Section 0: Indicator
        message.extend_from_slice(b"GRIB");
        message.extend_from_slice(&[0, 0]);
        message.push(self.discipline);
        message.push(2); // Edition
        message.extend_from_slice(&(message_length as u64).to_be_bytes());

        for section in &sections {
            message.extend_from_slice(section);
        }

        // Section 8: End
        message.extend_from_slice(b"7777");
        message
    }

    fn build_section1(&self) -> Vec<u8> {
        let mut section = Vec::new();
        section.extend_from_slice(&21u32.to_be_bytes());
        section.push(1);

        section.extend_from_slice(&self.center.to_be_bytes());
        section.extend_from_slice(&0u16.to_be_bytes()); // Sub-center
        section.push(2); // Master table version
        section.push(0); // Local table version
        section.push(1); // Significance of reference time

        section.extend_from_slice(&self.year.to_be_bytes());
        section.push(self.month);
        section.push(self.day);
        section.push(self.hour);
        section.push(0); // Minute
        section.push(0); // Second

        section.push(0); // Production status
        section.push(1); // Type of data
        section
    }

    fn build_section3(&self) -> Vec<u8> {
        let mut section = Vec::new();
        // Template 3.0: Latitude/Longitude
        section.extend_from_slice(&72u32.to_be_bytes());
        section.push(3);

        section.push(0); // Source of grid definition
        section.extend_from_slice(&(self.ni * self.nj).to_be_bytes());
        section.push(0);
        section.push(0);
        section.extend_from_slice(&0u16.to_be_bytes());

        section.push(6); // Shape of Earth
        section.push(0);
        section.extend_from_slice(&0u32.to_be_bytes());
        section.push(0);
        section.extend_from_slice(&0u32.to_be_bytes());
        section.push(0);
        section.extend_from_slice(&0u32.to_be_bytes());

        section.extend_from_slice(&self.ni.to_be_bytes());
        section.extend_from_slice(&self.nj.to_be_bytes());
        section.extend_from_slice(&0u32.to_be_bytes()); // Basic angle
        section.extend_from_slice(&0xFFFFFFFFu32.to_be_bytes()); // Subdivisions

        section.extend_from_slice(&self.la1.to_be_bytes());
        section.extend_from_slice(&self.lo1.to_be_bytes());
        section.push(48); // Resolution and component flags
        section.extend_from_slice(&self.la2.to_be_bytes());
        section.extend_from_slice(&self.lo2.to_be_bytes());
        section.extend_from_slice(&self.di.to_be_bytes());
        section.extend_from_slice(&self.dj.to_be_bytes());
        section.push(0b0100_0000); // Scanning mode
        section
    }

    fn build_section4(&self) -> Vec<u8> {
        let mut section = Vec::new();
        // Template 4.0: Analysis or forecast at horizontal level
        section.extend_from_slice(&34u32.to_be_bytes());
        section.push(4);

        section.extend_from_slice(&0u16.to_be_bytes()); // Number of coordinate values
        section.extend_from_slice(&0u16.to_be_bytes()); // Template number

        section.push(self.param_category);
        section.push(self.param_number);
        section.push(2); // Type of generating process
        section.push(0);
        section.push(0);
        section.extend_from_slice(&0u16.to_be_bytes());
        section.push(0);
        section.push(1); // Time range unit (hours)
        section.extend_from_slice(&0u32.to_be_bytes()); // Forecast time

        section.push(self.level_type);
        section.push(0);
        section.extend_from_slice(&self.level_value.to_be_bytes());

        section.push(255); // No second surface
        section.push(0);
        section.extend_from_slice(&0u32.to_be_bytes());
        section
    }

    fn packing(&self) -> (f32, f32, i16) {
        let (min_val, max_val) = self
            .values
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let range = max_val - min_val;
        // value = reference + packed * 2^E with 16-bit packed values
        let scale = if range == 0.0 {
            0
        } else {
            (range / 65535.0).log2().ceil() as i16
        };
        (min_val, range, scale)
    }

    fn build_section5(&self) -> Vec<u8> {
        let (reference, range, scale) = self.packing();
        let bits_per_value: u8 = if range == 0.0 { 0 } else { 16 };

        let mut section = Vec::new();
        section.extend_from_slice(&21u32.to_be_bytes());
        section.push(5);
        section.extend_from_slice(&(self.ni * self.nj).to_be_bytes());
        section.extend_from_slice(&0u16.to_be_bytes()); // Template 5.0
        section.extend_from_slice(&reference.to_be_bytes());
        section.extend_from_slice(&scale.to_be_bytes());
        section.extend_from_slice(&0i16.to_be_bytes()); // Decimal scale factor
        section.push(bits_per_value);
        section.push(0);
        section
    }

    fn build_section6(&self) -> Vec<u8> {
        let mut section = Vec::new();
        section.extend_from_slice(&6u32.to_be_bytes());
        section.push(6);
        section.push(255); // No bitmap
        section
    }

    fn build_section7(&self) -> Vec<u8> {
        let (reference, range, scale) = self.packing();
        let mut packed = Vec::new();
        if range != 0.0 {
            let factor = 2.0_f32.powi(scale as i32);
            for &v in &self.values {
                packed.extend_from_slice(&(((v - reference) / factor).round() as u16).to_be_bytes());
            }
        }

        let mut section = Vec::new();
        section.extend_from_slice(&(5 + packed.len() as u32).to_be_bytes());
        section.push(7);
        section.extend_from_slice(&packed);
        section
    }
}

/// Concatenate messages into one GRIB2 stream.
pub fn grib2_stream(messages: &[Grib2Builder]) -> Vec<u8> {
    messages.iter().flat_map(|m| m.build()).collect()
}

/// Evenly spaced samples from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}
