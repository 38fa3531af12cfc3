//! Measurement units attached to link attributes.
//!
//! A [`crate::Topology`] records one unit per attribute family so that edge
//! values stay plain numbers. Symbols parse case-insensitively.

use std::{fmt, str::FromStr};

use crate::error::TopologyError;

macro_rules! define_unit {
    (
        $(#[$meta:meta])*
        $Unit:ident, $kind:literal {
            $(
                $(#[$variant_meta:meta])*
                $Variant:ident => $symbol:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $Unit {
            $(
                $(#[$variant_meta])*
                $Variant,
            )+
        }

        impl $Unit {
            /// Returns the canonical symbol for this unit.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$Variant => $symbol,)+
                }
            }
        }

        impl fmt::Display for $Unit {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $Unit {
            type Err = TopologyError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                let trimmed = raw.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($symbol) {
                        return Ok(Self::$Variant);
                    }
                )+
                Err(TopologyError::UnknownUnit {
                    kind: $kind,
                    symbol: trimmed.to_owned(),
                })
            }
        }
    };
}

define_unit! {
    /// Unit of link capacity.
    ///
    /// # Examples
    /// ```
    /// use netopo_core::CapacityUnit;
    ///
    /// let unit: CapacityUnit = "mbps".parse().expect("known unit");
    /// assert_eq!(unit, CapacityUnit::Mbps);
    /// assert_eq!(unit.as_str(), "Mbps");
    /// ```
    CapacityUnit, "capacity" {
        /// Bits per second.
        Bps => "bps",
        /// Kilobits per second.
        Kbps => "Kbps",
        /// Megabits per second.
        Mbps => "Mbps",
        /// Gigabits per second.
        Gbps => "Gbps",
        /// Terabits per second.
        Tbps => "Tbps",
    }
}

define_unit! {
    /// Unit of link propagation delay.
    DelayUnit, "delay" {
        /// Nanoseconds.
        Nanoseconds => "ns",
        /// Microseconds.
        Microseconds => "us",
        /// Milliseconds.
        Milliseconds => "ms",
        /// Seconds.
        Seconds => "s",
        /// Minutes.
        Minutes => "min",
        /// Hours.
        Hours => "h",
    }
}

define_unit! {
    /// Unit of interface buffer size.
    BufferUnit, "buffer" {
        /// Packets.
        Packets => "packets",
        /// Bytes.
        Bytes => "bytes",
    }
}

impl CapacityUnit {
    const fn bits_per_second(self) -> f64 {
        match self {
            Self::Bps => 1.0,
            Self::Kbps => 1e3,
            Self::Mbps => 1e6,
            Self::Gbps => 1e9,
            Self::Tbps => 1e12,
        }
    }

    /// Expresses `value`, measured in `self`, in the `target` unit.
    ///
    /// # Examples
    /// ```
    /// use netopo_core::CapacityUnit;
    ///
    /// assert_eq!(CapacityUnit::Gbps.convert(10.0, CapacityUnit::Mbps), 10_000.0);
    /// ```
    #[must_use]
    pub fn convert(self, value: f64, target: Self) -> f64 {
        if self == target {
            return value;
        }
        value * self.bits_per_second() / target.bits_per_second()
    }
}

impl DelayUnit {
    const fn nanoseconds(self) -> f64 {
        match self {
            Self::Nanoseconds => 1.0,
            Self::Microseconds => 1e3,
            Self::Milliseconds => 1e6,
            Self::Seconds => 1e9,
            Self::Minutes => 6e10,
            Self::Hours => 3.6e12,
        }
    }

    /// Expresses `value`, measured in `self`, in the `target` unit.
    #[must_use]
    pub fn convert(self, value: f64, target: Self) -> f64 {
        if self == target {
            return value;
        }
        value * self.nanoseconds() / target.nanoseconds()
    }
}
