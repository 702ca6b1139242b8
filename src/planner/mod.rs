mod name_builder;
mod types;

pub use name_builder::build_sequence_name;
pub use types::*;

use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::record::FileRecord;
use crate::store::FileStore;
use crate::validator::validate_pattern;

/// Build a rename plan for `files`, numbered in the order given.
///
/// A candidate name is taken if it matches any original file name or if the
/// store reports it as existing. Taken names move the index forward, and the
/// skipped indices are never handed out again. Planning is all-or-nothing:
/// the first file that cannot be placed rejects the whole batch.
pub fn plan_renames(
    files: &[FileRecord],
    pattern: &str,
    options: &PlanOptions,
    store: &dyn FileStore,
) -> Result<RenamePlan, PlanError> {
    let validation = validate_pattern(pattern);
    if !validation.is_valid() {
        return Err(PlanError::InvalidPattern {
            errors: validation.errors,
        });
    }

    info!(
        count = files.len(),
        pattern = %pattern,
        padding = %options.padding,
        start = options.start_index,
        "Planning renames"
    );

    let original_names: HashSet<&str> = files.iter().map(|f| f.name.as_str()).collect();
    let mut used_names: HashSet<String> = HashSet::with_capacity(files.len());
    let mut plan = RenamePlan::default();
    let mut next_index = Some(options.start_index);

    for file in files {
        let Some(current) = next_index else {
            warn!(file = %file.name, "Sequence numbers exhausted");
            return Err(PlanError::IndexExhausted {
                file: file.name.clone(),
            });
        };

        let candidate = build_sequence_name(pattern, current, options.padding, &file.extension);

        let (actual_index, new_name, attempts) =
            if is_taken(&candidate, &original_names, store) {
                debug!(file = %file.name, candidate = %candidate, "Candidate taken, probing forward");
                probe_forward(file, pattern, current, options, &original_names, store)?
            } else {
                (current, candidate.clone(), 0)
            };

        if used_names.contains(&new_name) {
            return Err(PlanError::DuplicateName {
                name: new_name,
                file: file.name.clone(),
            });
        }

        let collision_resolved = attempts > 0;
        if collision_resolved {
            info!(
                file = %file.name,
                from = %candidate,
                to = %new_name,
                attempts,
                "Resolved name collision"
            );
            plan.collisions.push(CollisionResolution {
                file_name: file.name.clone(),
                original_name: candidate,
                original_index: current,
                resolved_name: new_name.clone(),
                resolved_index: actual_index,
                attempts,
            });
        }

        debug!(from = %file.name, to = %new_name, index = actual_index, "Planned rename");

        used_names.insert(new_name.clone());
        plan.entries.push(PreviewEntry {
            original_name: file.name.clone(),
            new_name,
            original_index: current,
            actual_index,
            collision_resolved,
            file: file.clone(),
        });

        next_index = actual_index.checked_add(1);
    }

    info!(
        entries = plan.len(),
        collisions = plan.collisions.len(),
        "Plan complete"
    );

    Ok(plan)
}

fn probe_forward(
    file: &FileRecord,
    pattern: &str,
    current: u64,
    options: &PlanOptions,
    original_names: &HashSet<&str>,
    store: &dyn FileStore,
) -> Result<(u64, String, u32), PlanError> {
    let mut attempts = 0;

    for offset in 1..=options.max_probe_attempts {
        let Some(index) = current.checked_add(u64::from(offset)) else {
            break;
        };
        attempts = offset;

        let candidate = build_sequence_name(pattern, index, options.padding, &file.extension);
        if !is_taken(&candidate, original_names, store) {
            return Ok((index, candidate, offset));
        }
    }

    warn!(file = %file.name, attempts, "Collision could not be resolved");

    Err(PlanError::UnresolvableCollision {
        file: file.name.clone(),
        start_index: current,
        attempts,
    })
}

fn is_taken(candidate: &str, original_names: &HashSet<&str>, store: &dyn FileStore) -> bool {
    if original_names.contains(candidate) {
        return true;
    }

    match store.name_exists(candidate) {
        Ok(exists) => exists,
        Err(e) => {
            warn!(name = %candidate, error = %e, "Existence check failed, treating name as taken");
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FileHandle;
    use crate::sorter::{sort_files, SortKey};
    use crate::store::memory::MemoryStore;

    fn file(name: &str, size: u64) -> FileRecord {
        FileRecord::new(name, size, None, None, FileHandle::new(format!("/photos/{}", name)))
    }

    fn options(padding: u8) -> PlanOptions {
        PlanOptions {
            padding: Padding::try_from(padding).unwrap(),
            ..PlanOptions::default()
        }
    }

    fn new_names(plan: &RenamePlan) -> Vec<&str> {
        plan.entries.iter().map(|e| e.new_name.as_str()).collect()
    }

    #[test]
    fn test_plan_sorted_by_size() {
        let files = vec![file("a.jpg", 10), file("b.png", 5)];
        let store = MemoryStore::with_names(&["a.jpg", "b.png"]);

        let sorted = sort_files(&files, SortKey::SizeAsc);
        let plan = plan_renames(&sorted, "file_{number}", &options(3), &store).unwrap();

        assert_eq!(plan.len(), 2);
        assert_eq!(plan.entries[0].original_name, "b.png");
        assert_eq!(plan.entries[0].new_name, "file_001.png");
        assert_eq!(plan.entries[1].original_name, "a.jpg");
        assert_eq!(plan.entries[1].new_name, "file_002.jpg");
        assert!(plan.collisions.is_empty());
        assert!(plan.entries.iter().all(|e| !e.collision_resolved));
    }

    #[test]
    fn test_collision_with_existing_file() {
        let files = vec![file("b.png", 5), file("a.jpg", 10)];
        let store = MemoryStore::with_names(&["a.jpg", "b.png", "file_002.jpg"]);

        let plan = plan_renames(&files, "file_{number}", &options(3), &store).unwrap();

        assert_eq!(new_names(&plan), ["file_001.png", "file_003.jpg"]);
        assert_eq!(plan.collisions.len(), 1);

        let resolution = &plan.collisions[0];
        assert_eq!(resolution.file_name, "a.jpg");
        assert_eq!(resolution.original_name, "file_002.jpg");
        assert_eq!(resolution.original_index, 2);
        assert_eq!(resolution.resolved_name, "file_003.jpg");
        assert_eq!(resolution.resolved_index, 3);
        assert_eq!(resolution.attempts, 1);

        let entry = &plan.entries[1];
        assert!(entry.collision_resolved);
        assert_eq!(entry.original_index, 2);
        assert_eq!(entry.actual_index, 3);
    }

    #[test]
    fn test_collision_with_original_name() {
        // The live folder is empty, but the batch itself owns file_001.txt
        let files = vec![file("notes.txt", 1), file("file_001.txt", 2)];
        let store = MemoryStore::default();

        let plan = plan_renames(&files, "file_{number}", &options(3), &store).unwrap();

        assert_eq!(new_names(&plan), ["file_002.txt", "file_003.txt"]);
        assert_eq!(plan.collisions.len(), 1);
        assert_eq!(plan.entries[0].original_index, 1);
        assert_eq!(plan.entries[0].actual_index, 2);
    }

    #[test]
    fn test_collision_consumes_indices() {
        let files = vec![file("a.jpg", 1), file("b.jpg", 2), file("c.jpg", 3)];
        let store = MemoryStore::with_names(&["img_1.jpg", "img_2.jpg", "img_4.jpg"]);

        let plan = plan_renames(&files, "img_{number}", &options(0), &store).unwrap();

        assert_eq!(new_names(&plan), ["img_3.jpg", "img_5.jpg", "img_6.jpg"]);
        assert_eq!(plan.collisions.len(), 2);
        assert_eq!(plan.collisions[0].attempts, 2);

        let indices: Vec<u64> = plan.entries.iter().map(|e| e.actual_index).collect();
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_probe_error_counts_as_collision() {
        let files = vec![file("a.jpg", 1)];
        let store = MemoryStore::default().fail_probe("file_001.jpg");

        let plan = plan_renames(&files, "file_{number}", &options(3), &store).unwrap();

        assert_eq!(new_names(&plan), ["file_002.jpg"]);
        assert!(plan.entries[0].collision_resolved);
    }

    #[test]
    fn test_unresolvable_collision_fails_whole_plan() {
        let files = vec![file("first.jpg", 1), file("a.jpg", 2)];
        let store = MemoryStore::with_names(&["n2.jpg", "n3.jpg", "n4.jpg", "n5.jpg"]);
        let options = PlanOptions {
            padding: Padding::try_from(0).unwrap(),
            start_index: 1,
            max_probe_attempts: 3,
        };

        let err = plan_renames(&files, "n{number}", &options, &store).unwrap_err();

        assert_eq!(
            err,
            PlanError::UnresolvableCollision {
                file: "a.jpg".to_string(),
                start_index: 2,
                attempts: 3,
            }
        );
    }

    #[test]
    fn test_last_index_leaves_no_room_for_next_file() {
        let files = vec![file("a.jpg", 1), file("b.jpg", 2)];
        let store = MemoryStore::with_names(&["a.jpg", "b.jpg"]);
        let options = PlanOptions {
            start_index: u64::MAX,
            ..options(3)
        };

        let err = plan_renames(&files, "f_{number}", &options, &store).unwrap_err();

        assert_eq!(
            err,
            PlanError::IndexExhausted {
                file: "b.jpg".to_string()
            }
        );
        assert_eq!(err.offending_file(), Some("b.jpg"));
    }

    #[test]
    fn test_single_file_at_last_index() {
        let files = vec![file("a.jpg", 1)];
        let store = MemoryStore::default();
        let options = PlanOptions {
            start_index: u64::MAX,
            ..options(3)
        };

        let plan = plan_renames(&files, "f_{number}", &options, &store).unwrap();

        assert_eq!(new_names(&plan), [format!("f_{}.jpg", u64::MAX)]);
    }

    #[test]
    fn test_forward_search_reports_attempts_made_before_index_runs_out() {
        let files = vec![file("a.jpg", 1)];
        let taken: Vec<String> = (u64::MAX - 2..=u64::MAX)
            .map(|i| format!("n{}.jpg", i))
            .collect();
        let taken: Vec<&str> = taken.iter().map(String::as_str).collect();
        let store = MemoryStore::with_names(&taken);
        let options = PlanOptions {
            padding: Padding::try_from(0).unwrap(),
            start_index: u64::MAX - 2,
            max_probe_attempts: 1000,
        };

        let err = plan_renames(&files, "n{number}", &options, &store).unwrap_err();

        assert_eq!(
            err,
            PlanError::UnresolvableCollision {
                file: "a.jpg".to_string(),
                start_index: u64::MAX - 2,
                attempts: 2,
            }
        );
    }

    #[test]
    fn test_invalid_pattern_returns_errors() {
        let files = vec![file("a.jpg", 1)];
        let store = MemoryStore::default();

        let err = plan_renames(&files, "bad/{number}/{number}", &options(3), &store).unwrap_err();

        match err {
            PlanError::InvalidPattern { errors } => {
                assert_eq!(errors.len(), 2);
                assert!(errors[0].contains("exactly one"));
                assert!(errors[1].contains("invalid characters"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_empty_file_list() {
        let store = MemoryStore::default();

        let plan = plan_renames(&[], "file_{number}", &options(3), &store).unwrap();

        assert!(plan.is_empty());
        assert!(plan.collisions.is_empty());
    }

    #[test]
    fn test_custom_start_index() {
        let files = vec![file("a.jpg", 1), file("b.jpg", 2)];
        let store = MemoryStore::default();
        let options = PlanOptions {
            start_index: 10,
            ..options(2)
        };

        let plan = plan_renames(&files, "shot-{number}", &options, &store).unwrap();

        assert_eq!(new_names(&plan), ["shot-10.jpg", "shot-11.jpg"]);
    }

    #[test]
    fn test_planning_is_idempotent() {
        let files = vec![file("x.jpg", 3), file("y.png", 1), file("z", 2)];
        let store = MemoryStore::with_names(&["x.jpg", "y.png", "z", "p_02"]);

        let first = plan_renames(&files, "p_{number}", &options(2), &store).unwrap();
        let second = plan_renames(&files, "p_{number}", &options(2), &store).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_names_are_distinct_and_lengths_match() {
        let files: Vec<FileRecord> = (0..50)
            .map(|i| file(&format!("photo{}.jpg", i), i))
            .collect();
        let store = MemoryStore::with_names(&["file_005.jpg", "file_006.jpg", "file_030.jpg"]);

        let plan = plan_renames(&files, "file_{number}", &options(3), &store).unwrap();

        assert_eq!(plan.len(), files.len());
        let unique: HashSet<&str> = new_names(&plan).into_iter().collect();
        assert_eq!(unique.len(), files.len());
    }

    #[test]
    fn test_entry_back_reference() {
        let files = vec![file("clip.mov", 99)];
        let store = MemoryStore::default();

        let plan = plan_renames(&files, "{number}", &options(4), &store).unwrap();
        let entry = &plan.entries[0];

        assert_eq!(entry.new_name, "0001.mov");
        assert_eq!(entry.size(), 99);
        assert_eq!(entry.extension(), ".mov");
        assert_eq!(entry.handle().path(), std::path::Path::new("/photos/clip.mov"));
    }
}
