//! Error types for the netopo core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Structural feature of a topology that a graph target refused to accept.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum StructureViolation {
    /// The edge connects a vertex to itself.
    SelfLoop,
    /// The edge duplicates an existing connection between the same vertices.
    ParallelEdge,
}

impl StructureViolation {
    /// Returns a short lowercase label suitable for logs and summaries.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SelfLoop => "self-loop",
            Self::ParallelEdge => "parallel edge",
        }
    }
}

impl fmt::Display for StructureViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error produced while building or configuring a [`crate::Topology`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum TopologyError {
    /// A generator parameter failed validation.
    #[error("{generator}: parameter `{parameter}` = {value} is invalid ({requirement})")]
    InvalidParameter {
        /// Generator that rejected the parameter.
        generator: &'static str,
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Value supplied by the caller.
        value: u64,
        /// Human-readable constraint the value violated.
        requirement: &'static str,
    },
    /// The requested topology would contain more nodes than can be addressed.
    #[error("{generator}: requested topology is too large to materialise")]
    SizeOverflow {
        /// Generator whose node count overflowed.
        generator: &'static str,
    },
    /// A unit symbol could not be recognised.
    #[error("unknown {kind} unit `{symbol}`")]
    UnknownUnit {
        /// Unit family being parsed (`capacity`, `delay` or `buffer`).
        kind: &'static str,
        /// Raw symbol supplied by the caller.
        symbol: String,
    },
    /// A subset of links was assigned a unit that cannot be converted into
    /// the unit already recorded on the topology.
    #[error("cannot assign {kind} in `{requested}` to some links while others use `{recorded}`")]
    IncompatibleUnit {
        /// Unit family being assigned.
        kind: &'static str,
        /// Unit already recorded on the topology.
        recorded: &'static str,
        /// Unit supplied by the caller.
        requested: &'static str,
    },
}

define_error_codes! {
    /// Stable codes describing [`TopologyError`] variants.
    enum TopologyErrorCode for TopologyError {
        /// A generator parameter failed validation.
        InvalidParameter => InvalidParameter { .. } => "TOPOLOGY_INVALID_PARAMETER",
        /// The requested topology would contain more nodes than can be addressed.
        SizeOverflow => SizeOverflow { .. } => "TOPOLOGY_SIZE_OVERFLOW",
        /// A unit symbol could not be recognised.
        UnknownUnit => UnknownUnit { .. } => "TOPOLOGY_UNKNOWN_UNIT",
        /// A link subset was assigned a unit incompatible with the recorded one.
        IncompatibleUnit => IncompatibleUnit { .. } => "TOPOLOGY_INCOMPATIBLE_UNIT",
    }
}

/// Error type produced when converting a [`crate::Topology`] into a graph.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum AdapterError {
    /// The caller supplied no topology.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Description of the rejected argument.
        reason: &'static str,
    },
    /// The target graph representation cannot express an edge of the topology.
    #[error("edge #{edge_index} ({source_node} -> {target_node}) is a {violation}, which the target graph does not support")]
    UnsupportedStructure {
        /// Kind of structure the target refused.
        violation: StructureViolation,
        /// Insertion index of the offending edge within the topology.
        edge_index: usize,
        /// Rendered identifier of the edge source.
        source_node: Arc<str>,
        /// Rendered identifier of the edge target.
        target_node: Arc<str>,
    },
}

define_error_codes! {
    /// Stable codes describing [`AdapterError`] variants.
    enum AdapterErrorCode for AdapterError {
        /// The caller supplied no topology.
        InvalidArgument => InvalidArgument { .. } => "ADAPTER_INVALID_ARGUMENT",
        /// The target graph representation cannot express an edge of the topology.
        UnsupportedStructure => UnsupportedStructure { .. } => "ADAPTER_UNSUPPORTED_STRUCTURE",
    }
}

impl AdapterError {
    /// Retrieve the [`StructureViolation`] when the error stems from an unsupported edge.
    #[must_use]
    pub const fn violation(&self) -> Option<StructureViolation> {
        match self {
            Self::UnsupportedStructure { violation, .. } => Some(*violation),
            Self::InvalidArgument { .. } => None,
        }
    }
}

/// Convenient alias for results returned by the topology API.
pub type Result<T> = core::result::Result<T, TopologyError>;
