//! Contains constraints, enumerations and other custom types.

mod constraints;
mod enums;
mod filtering;
mod pagination;
mod sorting;

pub use constraints::{
    ConstraintCategory, ConstraintViolation, TagConstraints, TaskConstraints,
    TaskTagConstraints, UserConstraints,
};
pub use enums::TaskPriority;
pub use filtering::TaskFilter;
pub use pagination::{DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT, OffsetPagination};
pub use sorting::{SortBy, SortOrder, TaskSortBy, TaskSortField};
