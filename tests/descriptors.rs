// Kept as the only test in its binary, so nothing else opens descriptors while they are counted

use tempfile::TempDir;

use tsh::eval::tokenize;
use tsh::exec::{Executor, Outcome};
use tsh::state::Configuration;

fn open_descriptors() -> usize {
    std::fs::read_dir("/proc/self/fd").unwrap().count()
}

#[test]
fn lines_leave_no_descriptors_open() {
    //given
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.txt");
    let executor = Executor::new(&Configuration {
        show_errors: false,
        ..Configuration::default()
    });
    let lines = [
        format!("echo hi | cat > {} && echo x | true", out.display()),
        format!("seq 1 1000 | sort -r | head -n 1 > {}", out.display()),
        "definitely-not-a-command | cat && true".to_string(),
        "echo lost > /definitely/not/a/dir/out.txt".to_string(),
        format!("echo hi | > {}", out.display()),
    ];
    let before = open_descriptors();

    //when
    for _ in 0..5 {
        for line in &lines {
            assert!(matches!(executor.run(&tokenize(line)), Outcome::Continue(_)));
        }
    }

    //then
    assert_eq!(open_descriptors(), before);
    assert_eq!(
        std::fs::read_to_string(&out).unwrap().lines().count(),
        10
    );
}
