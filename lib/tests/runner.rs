// SPDX-FileCopyrightText: 2023 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

// Commands are run through the system shell, or through the fake shells
// in the mock module when the real GPIO tools would be invoked.

mod mock;

use gpiocmd::{Command, Error, Reading, Runner, Value};
use mock::{run, runner_with_shell, shells};
use std::io;

mod catalog {
    use super::*;

    #[test]
    fn active() {
        let r = runner_with_shell(&shells().active);
        for c in Command::ALL {
            let mut sink = Vec::new();
            let reading = r
                .read_state_into(c, &mut sink)
                .expect("read should succeed");
            assert_eq!(reading, Reading::Level(Value::Active), "{c}");
            assert_eq!(
                String::from_utf8(sink).unwrap(),
                format!("GPIO State: 1 {}\n", c.invocation())
            );
        }
    }

    #[test]
    fn inactive() {
        let r = runner_with_shell(&shells().inactive);
        for c in Command::ALL {
            let mut sink = Vec::new();
            let reading = r
                .read_state_into(c, &mut sink)
                .expect("read should succeed");
            assert_eq!(reading, Reading::Level(Value::Inactive), "{c}");
            assert_eq!(
                String::from_utf8(sink).unwrap(),
                format!("GPIO State: 0 {}\n", c.invocation())
            );
        }
    }

    #[test]
    fn read_bit() {
        assert_eq!(
            runner_with_shell(&shells().active)
                .read_bit(Command::ReadButton14)
                .unwrap(),
            1
        );
        assert_eq!(
            runner_with_shell(&shells().inactive)
                .read_bit(Command::ReadButton14)
                .unwrap(),
            0
        );
    }

    #[test]
    fn drive() {
        let r = Runner::builder()
            .with_shell(&shells().active)
            .with_echo(false)
            .build()
            .unwrap();
        r.drive(Command::SetPin17High).expect("drive should succeed");
        r.drive(Command::SetPin11Low).expect("drive should succeed");
    }
}

#[test]
fn active() {
    let (res, echo) = run("printf '1\\n'");
    assert_eq!(res.unwrap(), Reading::Level(Value::Active));
    assert_eq!(echo, "GPIO State: 1\n");
}

#[test]
fn inactive() {
    let (res, echo) = run("printf '0\\n'");
    assert_eq!(res.unwrap(), Reading::Level(Value::Inactive));
    assert_eq!(echo, "GPIO State: 0\n");
}

#[test]
fn not_one() {
    for out in ["9", "2", "a", " 1", "-1"] {
        let (res, echo) = run(&format!("printf '%s\\n' '{out}'"));
        assert_eq!(res.unwrap(), Reading::Level(Value::Inactive), "{out}");
        assert_eq!(echo, format!("GPIO State: {out}\n"));
    }
}

#[test]
fn no_output() {
    let (res, echo) = run("true");
    assert_eq!(res.unwrap(), Reading::NoReading);
    assert!(echo.is_empty());
}

#[test]
fn no_output_with_failure_status() {
    // as gpioset does when the line is busy
    let (res, echo) = run("exit 1");
    assert_eq!(res.unwrap(), Reading::NoReading);
    assert!(echo.is_empty());
}

#[test]
fn stderr_is_not_read() {
    let (res, echo) = run("echo 1 >&2");
    assert_eq!(res.unwrap(), Reading::NoReading);
    assert!(echo.is_empty());
}

#[test]
fn first_line_only() {
    let (res, echo) = run("printf '0\\n1\\n'");
    assert_eq!(res.unwrap(), Reading::Level(Value::Inactive));
    assert_eq!(echo, "GPIO State: 0\n");
}

#[test]
fn unterminated_line() {
    let (res, echo) = run("printf 1");
    assert_eq!(res.unwrap(), Reading::Level(Value::Active));
    assert_eq!(echo, "GPIO State: 1");
}

#[test]
fn overlong_line() {
    let (res, echo) = run("head -c 5000 /dev/zero | tr '\\000' '1'");
    assert_eq!(res.unwrap(), Reading::Level(Value::Active));
    let line = echo
        .strip_prefix("GPIO State: ")
        .expect("echo should be labelled");
    assert_eq!(line.len(), 1023);
    assert!(line.bytes().all(|b| b == b'1'));
}

#[test]
fn overlong_line_with_small_buffer() {
    shells();
    let mut sink = Vec::new();
    let reading = Runner::builder()
        .with_max_line(4)
        .build()
        .unwrap()
        .read_state_into("printf '1234567\\n'", &mut sink)
        .unwrap();
    assert_eq!(reading, Reading::Level(Value::Active));
    assert_eq!(sink, b"GPIO State: 123");
}

#[test]
fn endless_output() {
    // the writer is terminated once the pipe is closed
    let (res, echo) = run("yes 1");
    assert_eq!(res.unwrap(), Reading::Level(Value::Active));
    assert_eq!(echo, "GPIO State: 1\n");
}

#[test]
fn echo_passthrough() {
    let raw = "1 \t raw  output ;|& \u{e9}";
    let (res, echo) = run(&format!("printf '%s\\n' '{raw}'"));
    assert_eq!(res.unwrap(), Reading::Level(Value::Active));
    assert_eq!(echo, format!("GPIO State: {raw}\n"));
}

#[test]
fn echo_disabled() {
    shells();
    let mut sink = Vec::new();
    let reading = Runner::builder()
        .with_echo(false)
        .build()
        .unwrap()
        .read_state_into("printf '1\\n'", &mut sink)
        .unwrap();
    assert_eq!(reading, Reading::Level(Value::Active));
    assert!(sink.is_empty());
}

#[test]
fn custom_label() {
    shells();
    let mut sink = Vec::new();
    Runner::builder()
        .with_label("button=")
        .build()
        .unwrap()
        .read_state_into("printf '0\\n'", &mut sink)
        .unwrap();
    assert_eq!(sink, b"button=0\n");
}

#[test]
fn sequential_reads_are_independent() {
    let (first, _) = run("printf '1\\n'");
    let (second, _) = run("printf '0\\n'");
    let (third, _) = run("true");
    let (fourth, _) = run("printf '1\\n'");
    assert_eq!(first.unwrap().value(), Value::Active);
    assert_eq!(second.unwrap().value(), Value::Inactive);
    assert_eq!(third.unwrap(), Reading::NoReading);
    assert_eq!(fourth.unwrap().value(), Value::Active);
}

#[test]
fn missing_tool() {
    let (res, echo) = run("gpiocmd-test-no-such-tool 14");
    match res.expect_err("missing tool should fail to launch") {
        Error::Spawn(cmd, e) => {
            assert_eq!(cmd, "gpiocmd-test-no-such-tool 14");
            assert_eq!(e.kind(), io::ErrorKind::NotFound);
        }
        e => panic!("unexpected error: {e}"),
    }
    assert!(echo.is_empty());
}

#[test]
fn missing_shell() {
    shells();
    let mut sink = Vec::new();
    let e = Runner::builder()
        .with_shell("/nonexistent/gpiocmd/sh")
        .build()
        .unwrap()
        .read_state_into("printf '1\\n'", &mut sink)
        .expect_err("missing shell should fail to spawn");
    assert!(matches!(e, Error::Spawn(_, ref e) if e.kind() == io::ErrorKind::NotFound));
    assert!(e.to_string().starts_with("failed to run command 'printf"));
    assert!(sink.is_empty());
}

#[test]
fn read_gpio_state() {
    shells();
    assert_eq!(gpiocmd::read_gpio_state("printf '1\\n'").unwrap(), 1);
    assert_eq!(gpiocmd::read_gpio_state("printf '0\\n'").unwrap(), 0);
    assert_eq!(gpiocmd::read_gpio_state("true").unwrap(), 0);
}

#[test]
fn read() {
    shells();
    let r = Runner::builder().with_echo(false).build().unwrap();
    assert_eq!(r.read("printf '1\\n'").unwrap(), Value::Active);
    assert_eq!(r.read("exit 0").unwrap(), Value::Inactive);
}

#[test]
fn concurrent_reads_do_not_block() {
    use std::thread;
    use std::time::{Duration, Instant};

    shells();
    let slow = thread::spawn(|| Runner::default().read_state("sleep 2; printf '1\\n'"));
    thread::sleep(Duration::from_millis(300));
    let start = Instant::now();
    let fast = Runner::default().read_state("printf '0\\n'");
    let elapsed = start.elapsed();
    assert_eq!(fast.unwrap(), Reading::Level(Value::Inactive));
    // stdout is only held for the echo, not while the slow child runs
    assert!(elapsed < Duration::from_secs(1), "fast read took {elapsed:?}");
    assert_eq!(
        slow.join().unwrap().unwrap(),
        Reading::Level(Value::Active)
    );
}

#[test]
fn echo_is_a_single_write() {
    use std::io::Write;

    // records the size of each write
    struct Writes(Vec<usize>);
    impl Write for Writes {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.push(buf.len());
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    shells();
    let mut sink = Writes(Vec::new());
    Runner::default()
        .read_state_into("printf '1\\n'", &mut sink)
        .unwrap();
    assert_eq!(sink.0, ["GPIO State: 1\n".len()]);
}
