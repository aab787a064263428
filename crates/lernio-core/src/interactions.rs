//! Enrollment records and the user × course interaction matrix.

use indexmap::IndexSet;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A cleaned enrollment record: one user and the courses they enrolled in.
///
/// Produced by an ingestion collaborator (e.g. the CLI's CSV loader). The
/// engine expects identifiers to be normalized already; the only validation
/// performed here is rejecting an empty user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentRecord {
    /// Normalized user identifier. Must be non-empty.
    pub user_id: String,
    /// Normalized course identifiers. May be empty for a user with no
    /// observed enrollments.
    pub course_ids: Vec<String>,
}

impl EnrollmentRecord {
    /// Builds a record from anything string-like.
    pub fn new<U, I, C>(user_id: U, course_ids: I) -> Self
    where
        U: Into<String>,
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Self {
            user_id: user_id.into(),
            course_ids: course_ids.into_iter().map(Into::into).collect(),
        }
    }
}

/// Dense binary user × course interaction matrix with id ↔ index mappings.
///
/// Built once from a snapshot of enrollment records and immutable afterward.
/// Both mappings assign indices in first-appearance order, so rebuilding from
/// the same record sequence reproduces identical mappings and an identical
/// matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Interactions {
    /// `users × courses`, cells are 0.0 or 1.0.
    matrix: DMatrix<f64>,
    users: IndexSet<String>,
    courses: IndexSet<String>,
}

impl Interactions {
    /// Builds the interaction matrix from cleaned enrollment records.
    ///
    /// Duplicate user ids collapse to a single row and all of their course
    /// lists union into it. The recommender's exclusion set is later derived
    /// from that same row, so the matrix and the exclusion logic can never
    /// disagree about what a user is enrolled in. Listing the same course
    /// twice for a user is idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecord`] if a record carries an empty user id.
    pub fn from_records(records: &[EnrollmentRecord]) -> Result<Self> {
        let mut users = IndexSet::new();
        let mut courses = IndexSet::new();
        let mut cells = Vec::new();

        for (position, record) in records.iter().enumerate() {
            if record.user_id.is_empty() {
                return Err(Error::InvalidRecord(format!(
                    "record {position} has an empty user id"
                )));
            }
            let (row, _) = users.insert_full(record.user_id.clone());
            for course_id in &record.course_ids {
                let (column, _) = courses.insert_full(course_id.clone());
                cells.push((row, column));
            }
        }

        let mut matrix = DMatrix::zeros(users.len(), courses.len());
        for (row, column) in cells {
            matrix[(row, column)] = 1.0;
        }

        Ok(Self {
            matrix,
            users,
            courses,
        })
    }

    /// Number of distinct users.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Number of distinct courses across all enrollment lists.
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Number of observed (user, course) enrollment pairs.
    #[must_use]
    pub fn enrollment_count(&self) -> usize {
        self.matrix.iter().filter(|cell| **cell > 0.5).count()
    }

    /// The dense 0/1 matrix, `users × courses`.
    #[must_use]
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Dense index of a user id, if the user was seen at build time.
    #[must_use]
    pub fn user_index(&self, user_id: &str) -> Option<usize> {
        self.users.get_index_of(user_id)
    }

    /// Dense index of a course id, if the course was seen at build time.
    #[must_use]
    pub fn course_index(&self, course_id: &str) -> Option<usize> {
        self.courses.get_index_of(course_id)
    }

    /// User id at a dense index.
    #[must_use]
    pub fn user_id(&self, index: usize) -> Option<&str> {
        self.users.get_index(index).map(String::as_str)
    }

    /// Course id at a dense index.
    #[must_use]
    pub fn course_id(&self, index: usize) -> Option<&str> {
        self.courses.get_index(index).map(String::as_str)
    }

    /// Whether the user at `user_index` enrolled in the course at
    /// `course_index`.
    ///
    /// Cells hold exactly 0.0 or 1.0; the threshold avoids a float equality
    /// comparison.
    #[must_use]
    pub fn is_enrolled(&self, user_index: usize, course_index: usize) -> bool {
        self.matrix[(user_index, course_index)] > 0.5
    }

    /// Course indices the user at `user_index` is enrolled in.
    #[must_use]
    pub fn enrolled_courses(&self, user_index: usize) -> Vec<usize> {
        (0..self.course_count())
            .filter(|&course| self.is_enrolled(user_index, course))
            .collect()
    }

    /// User ids in index order.
    pub fn user_ids(&self) -> impl Iterator<Item = &str> {
        self.users.iter().map(String::as_str)
    }

    /// Course ids in index order.
    pub fn course_ids(&self) -> impl Iterator<Item = &str> {
        self.courses.iter().map(String::as_str)
    }
}
