// navigator_core/src/prelude.rs

// --- Core Abstractions (The main contracts of the library) ---
pub use crate::navigator::PathPlanner;
pub use crate::world::MotionModel;

// --- Core Data Structures ---
pub use crate::intent::{Intent, MoveIntent, StopIntent};
pub use crate::primitive::{MovePrimitive, Primitive, PrimitiveMsg, StopPrimitive};
pub use crate::types::{normalize_angle, Bounds, Point, RobotId, Timestamp, Vector};
pub use crate::world::{Field, MotionSnapshot, Robot, Team, World};

// --- Navigation ---
pub use crate::navigator::obstacle::Obstacle;
pub use crate::navigator::{
    DispatchReport, Navigator, NavigatorConfig, Path, PathExpansion, PlanRequest, RrtConfig,
    RrtPlanner,
};

// --- Errors ---
pub use crate::error::{ConfigError, DispatchError, PlanningError, PrimitiveError, StateError};

// --- Concrete Model Implementations ---
pub use crate::world::LinearMotionModel;
