//! Converting notebooks into the workspace.
//!
//! With one job, notebooks are converted in discovery order and the first
//! failure stops the loop. With more jobs, a rayon pool sized to the job
//! count converts notebooks in parallel; once any conversion fails no new
//! conversion is started, in-flight ones finish, and the failure is
//! returned. Workers report progress over a channel so the UI is only used
//! from the calling thread.

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use crate::error::{NbreqsError, Result};
use crate::tools::NotebookConverter;
use crate::ui::UserInterface;

/// File name of a notebook for display.
pub fn display_name(notebook: &Path) -> String {
    notebook
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| notebook.display().to_string())
}

/// Convert every notebook into `output_dir`, stopping at the first failure.
///
/// Returns the number of notebooks converted.
pub fn convert_all(
    converter: &dyn NotebookConverter,
    notebooks: &[PathBuf],
    output_dir: &Path,
    jobs: usize,
    ui: &mut dyn UserInterface,
) -> Result<usize> {
    if jobs <= 1 || notebooks.len() <= 1 {
        convert_sequential(converter, notebooks, output_dir, ui)
    } else {
        convert_parallel(converter, notebooks, output_dir, jobs, ui)
    }
}

fn convert_sequential(
    converter: &dyn NotebookConverter,
    notebooks: &[PathBuf],
    output_dir: &Path,
    ui: &mut dyn UserInterface,
) -> Result<usize> {
    let total = notebooks.len();

    for (i, notebook) in notebooks.iter().enumerate() {
        let name = display_name(notebook);
        tracing::debug!("Converting {} to a script", notebook.display());
        let mut spinner = ui.start_spinner(&format!("[{}/{}] Converting {}", i + 1, total, name));

        if let Err(e) = converter.convert(notebook, output_dir) {
            spinner.finish_error(&format!("Failed to convert {}", name));
            return Err(e);
        }
        spinner.finish_success(&format!("Converted {}", name));
    }

    Ok(total)
}

/// Worker-to-UI progress events, keyed by notebook index.
enum Progress {
    Converted(usize),
    Failed(usize),
}

fn convert_parallel(
    converter: &dyn NotebookConverter,
    notebooks: &[PathBuf],
    output_dir: &Path,
    jobs: usize,
    ui: &mut dyn UserInterface,
) -> Result<usize> {
    let total = notebooks.len();
    let workers = jobs.min(total);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("nbreqs-convert-{}", i))
        .build()
        .map_err(|e| {
            NbreqsError::Other(anyhow::anyhow!("Failed to start conversion workers: {}", e))
        })?;

    tracing::debug!("Converting {} notebooks on {} workers", total, workers);
    let mut spinner = ui.start_spinner(&format!(
        "Converting {} notebooks ({} jobs)",
        total, workers
    ));

    let (tx, rx) = mpsc::channel::<Progress>();
    let mut outcome: Result<()> = Ok(());
    let mut converted = 0;
    let mut first_failed = None;
    let result = &mut outcome;

    pool.in_place_scope(|scope| {
        scope.spawn(move |_| {
            *result = notebooks.par_iter().enumerate().try_for_each_with(
                tx,
                |tx, (idx, notebook)| {
                    tracing::debug!("Converting {} to a script", notebook.display());
                    match converter.convert(notebook, output_dir) {
                        Ok(()) => {
                            tx.send(Progress::Converted(idx)).ok();
                            Ok(())
                        }
                        Err(e) => {
                            tx.send(Progress::Failed(idx)).ok();
                            Err(e)
                        }
                    }
                },
            );
        });

        // ends once every worker has dropped its sender
        for event in rx {
            match event {
                Progress::Converted(idx) => {
                    converted += 1;
                    spinner.set_message(&format!(
                        "[{}/{}] Converted {}",
                        converted,
                        total,
                        display_name(&notebooks[idx])
                    ));
                }
                Progress::Failed(idx) => {
                    tracing::debug!("Conversion of {} failed", notebooks[idx].display());
                    first_failed.get_or_insert(idx);
                }
            }
        }
    });

    match outcome {
        Err(e) => {
            let name = first_failed
                .map(|idx| display_name(&notebooks[idx]))
                .unwrap_or_else(|| "notebook".to_string());
            spinner.finish_error(&format!("Failed to convert {}", name));
            Err(e)
        }
        Ok(()) => {
            spinner.finish_success(&format!("Converted {} notebooks", converted));
            Ok(converted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{MockUI, SpinnerStatus};
    use std::collections::HashSet;
    use std::fs;
    use std::sync::Mutex;
    use std::thread;
    use std::time::Duration;
    use tempfile::TempDir;

    /// Writes `<stem>.py` and fails for notebooks named in `fail`.
    /// Successful conversions take `delay`.
    struct FakeConverter {
        fail: HashSet<String>,
        delay: Duration,
        calls: Mutex<Vec<String>>,
    }

    impl FakeConverter {
        fn new(fail: &[&str]) -> Self {
            Self {
                fail: fail.iter().map(|s| s.to_string()).collect(),
                delay: Duration::ZERO,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn slow(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl NotebookConverter for FakeConverter {
        fn convert(&self, notebook: &Path, output_dir: &Path) -> Result<()> {
            let name = display_name(notebook);
            self.calls.lock().unwrap().push(name.clone());
            if self.fail.contains(&name) {
                return Err(NbreqsError::ConversionFailed {
                    notebook: notebook.to_path_buf(),
                    code: Some(1),
                    stderr: String::new(),
                });
            }
            thread::sleep(self.delay);
            let stem = notebook.file_stem().unwrap().to_string_lossy().to_string();
            fs::write(output_dir.join(format!("{}.py", stem)), "import numpy\n")?;
            Ok(())
        }
    }

    fn notebooks(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| PathBuf::from("Code").join(n)).collect()
    }

    #[test]
    fn sequential_converts_all_in_order() {
        let out = TempDir::new().unwrap();
        let converter = FakeConverter::new(&[]);
        let mut ui = MockUI::new();

        let n = convert_all(
            &converter,
            &notebooks(&["a.ipynb", "b.ipynb"]),
            out.path(),
            1,
            &mut ui,
        )
        .unwrap();

        assert_eq!(n, 2);
        assert_eq!(converter.calls(), vec!["a.ipynb", "b.ipynb"]);
        assert!(out.path().join("a.py").exists());
        assert!(out.path().join("b.py").exists());
        assert_eq!(ui.finished_with(SpinnerStatus::Success), 2);
    }

    #[test]
    fn sequential_stops_at_first_failure() {
        let out = TempDir::new().unwrap();
        let converter = FakeConverter::new(&["b.ipynb"]);
        let mut ui = MockUI::new();

        let err = convert_all(
            &converter,
            &notebooks(&["a.ipynb", "b.ipynb", "c.ipynb"]),
            out.path(),
            1,
            &mut ui,
        )
        .unwrap_err();

        assert!(matches!(err, NbreqsError::ConversionFailed { .. }));
        assert_eq!(converter.calls(), vec!["a.ipynb", "b.ipynb"]);
        assert!(!out.path().join("c.py").exists());
        assert_eq!(ui.finished_with(SpinnerStatus::Error), 1);
    }

    #[test]
    fn parallel_converts_all() {
        let out = TempDir::new().unwrap();
        let converter = FakeConverter::new(&[]);
        let mut ui = MockUI::new();
        let names = ["a.ipynb", "b.ipynb", "c.ipynb", "d.ipynb", "e.ipynb"];

        let n = convert_all(&converter, &notebooks(&names), out.path(), 3, &mut ui).unwrap();

        assert_eq!(n, 5);
        let mut calls = converter.calls();
        calls.sort();
        assert_eq!(calls, names);
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 5);
        assert_eq!(ui.spinners().len(), 1);
        assert_eq!(ui.finished_with(SpinnerStatus::Success), 1);
    }

    #[test]
    fn parallel_failure_stops_dispatching() {
        let out = TempDir::new().unwrap();
        let converter = FakeConverter::new(&["a.ipynb"]).slow(Duration::from_millis(20));
        let mut ui = MockUI::new();
        let mut list = notebooks(&["a.ipynb"]);
        list.extend((0..40).map(|i| PathBuf::from("Code").join(format!("n{:02}.ipynb", i))));

        let err = convert_all(&converter, &list, out.path(), 2, &mut ui).unwrap_err();

        match err {
            NbreqsError::ConversionFailed { notebook, .. } => {
                assert_eq!(notebook, PathBuf::from("Code/a.ipynb"));
            }
            other => panic!("expected ConversionFailed, got {other:?}"),
        }
        let calls = converter.calls();
        assert!(
            calls.len() < list.len(),
            "all {} notebooks were started after the failure",
            calls.len()
        );
        for nb in &list {
            let name = display_name(nb);
            if !calls.contains(&name) {
                let stem = nb.file_stem().unwrap().to_string_lossy().to_string();
                assert!(!out.path().join(format!("{}.py", stem)).exists());
            }
        }
        assert_eq!(ui.finished_with(SpinnerStatus::Error), 1);
        assert!(ui
            .spinner_finishes()
            .iter()
            .any(|(_, msg)| msg == "Failed to convert a.ipynb"));
    }

    #[test]
    fn more_jobs_than_notebooks() {
        let out = TempDir::new().unwrap();
        let converter = FakeConverter::new(&[]);
        let mut ui = MockUI::new();

        let n = convert_all(
            &converter,
            &notebooks(&["a.ipynb", "b.ipynb"]),
            out.path(),
            16,
            &mut ui,
        )
        .unwrap();
        assert_eq!(n, 2);
    }

    #[test]
    fn display_name_uses_file_name() {
        assert_eq!(display_name(Path::new("Code/eda.ipynb")), "eda.ipynb");
    }
}
