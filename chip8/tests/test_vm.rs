use chip8::{constants::*, prelude::*};

const MAZE: &[u8] = include_bytes!("../programs/maze");

fn load(program: &[u8]) -> Chip8Vm {
    let mut vm = Chip8Vm::new(Chip8Conf {
        rng_seed: Some(1),
        ..Default::default()
    });
    vm.load_bytecode(program).unwrap();
    vm
}

fn pc(vm: &Chip8Vm) -> u16 {
    vm.cpu().unwrap().pc()
}

#[test]
fn test_clear_screen() {
    let mut vm = load(&[0x00, 0xE0]);
    assert_eq!(vm.step().unwrap(), Flow::Draw);

    let display = vm.display().unwrap();
    assert!(display.pixels().iter().all(|px| !px));
    assert!(display.is_dirty());
}

#[test]
fn test_jump() {
    let mut vm = load(&[0x1A, 0xBC]);
    assert_eq!(vm.step().unwrap(), Flow::Jump);
    assert_eq!(pc(&vm), 0xABC);
}

#[test]
fn test_add_immediate() {
    let mut vm = load(&[0x6A, 0x05, 0x7A, 0x05]);
    vm.run_steps(2).unwrap();
    assert_eq!(vm.cpu().unwrap().registers()[0xA_u8], 10);
}

#[test]
fn test_call_and_return() {
    let mut program = vec![0; 0x102];
    program[0..2].copy_from_slice(&[0x23, 0x00]); // CALL 0x300
    program[0x100..0x102].copy_from_slice(&[0x00, 0xEE]); // RET
    let mut vm = load(&program);

    vm.step().unwrap();
    assert_eq!(pc(&vm), 0x300);
    assert_eq!(vm.cpu().unwrap().stack().as_slice(), &[0x202]);

    assert_eq!(vm.step().unwrap(), Flow::Jump);
    assert_eq!(pc(&vm), MEM_START as u16 + 2);
    assert!(vm.cpu().unwrap().stack().is_empty());
}

#[test]
fn test_key_wait_from_input_thread() {
    let mut vm = load(&[0xF3, 0x0A, 0x12, 0x02]);

    for _ in 0..10 {
        vm.update(1000.0 / 60.0).unwrap();
        assert_eq!(pc(&vm), MEM_START as u16);
    }

    let keypad = vm.keypad();
    std::thread::spawn(move || keypad.press(KeyCode::KeyC))
        .join()
        .unwrap();

    vm.update(1000.0 / 60.0).unwrap();
    assert_eq!(vm.cpu().unwrap().registers()[3_u8], 0xC);
    assert_eq!(pc(&vm), MEM_START as u16 + 2);
}

#[test]
fn test_unsupported_opcode() {
    let mut vm = load(&[0xFF, 0xFF]);

    let err = vm.update(1000.0 / 60.0).unwrap_err();
    assert_eq!(
        err.fault(),
        Some(Fault::UnsupportedOpcode {
            instr: 0xFFFF,
            addr: 0x200
        })
    );
    assert_eq!(
        err.to_string(),
        "runtime error: unsupported opcode FFFF at 0x0200"
    );
}

#[test]
fn test_load_errors() {
    let mut vm = Chip8Vm::new(Chip8Conf::default());
    let program = vec![0x00; MEM_SIZE - MEM_START + 1];
    assert!(matches!(
        vm.load_bytecode(&program),
        Err(Chip8Error::OutOfMemory { .. })
    ));

    assert!(matches!(
        "amiga".parse::<FontKind>(),
        Err(Chip8Error::InvalidConfig { field: "font", .. })
    ));

    let mut vm = Chip8Vm::new(Chip8Conf {
        memory_size: 0x100,
        ..Default::default()
    });
    assert!(matches!(
        vm.load_bytecode(&[0x00, 0xE0]),
        Err(Chip8Error::InvalidConfig {
            field: "program_start",
            ..
        })
    ));
    assert!(!vm.is_loaded());
}

#[test]
fn test_oversized_machine() {
    let confs = [
        Chip8Conf {
            display_width: usize::MAX / 2 + 1,
            display_height: 2,
            ..Default::default()
        },
        Chip8Conf {
            stack_size: usize::MAX,
            ..Default::default()
        },
    ];

    for conf in confs {
        let mut vm = Chip8Vm::new(conf);
        assert!(matches!(
            vm.load_bytecode(&[0x00, 0xE0]),
            Err(Chip8Error::InvalidConfig { .. })
        ));
        assert!(!vm.is_loaded());
    }
}

#[test]
fn test_small_machine() {
    // Programs can be loaded low when the font is moved out of the way.
    let mut vm = Chip8Vm::new(Chip8Conf {
        memory_size: 0x200,
        program_start: 0x000,
        font_start: 0x100,
        stack_size: 2,
        display_width: 16,
        display_height: 8,
        ..Default::default()
    });
    // LD v0, 0xF; LD F, v0; DRW v1, v1, 5
    vm.load_bytecode(&[0x60, 0x0F, 0xF0, 0x29, 0xD1, 0x15]).unwrap();
    vm.run_steps(3).unwrap();

    let cpu = vm.cpu().unwrap();
    assert_eq!(cpu.registers().index(), 0x100 + 0xF * 5);
    assert_eq!(
        vm.dump_display().unwrap(),
        concat!(
            "####............\n",
            "#...............\n",
            "####............\n",
            "#...............\n",
            "#...............\n",
            "................\n",
            "................\n",
            "................\n",
        )
    );
}

#[test]
fn test_vip_font() {
    let mut vm = Chip8Vm::new(Chip8Conf {
        font: FontKind::CosmacVip,
        ..Default::default()
    });
    vm.load_bytecode(&[0x00, 0xE0]).unwrap();

    let memory = vm.cpu().unwrap().memory();
    // The VIP "1" has a wide base.
    assert_eq!(memory.read(FONTSET_START + 5), 0x60);
}

#[test]
fn test_maze() {
    let mut vm = load(MAZE);

    // The maze fills the screen, then parks in a jump to itself.
    for _ in 0..120 {
        vm.update(1000.0 / 60.0).unwrap();
    }

    assert_eq!(pc(&vm), 0x218);
    let lit = vm
        .display()
        .unwrap()
        .pixels()
        .iter()
        .filter(|px| **px)
        .count();
    assert!(lit > 0);
}

#[test]
fn test_disassemble_maze() {
    let listing = Disassembler::new(MAZE).listing().unwrap();
    let lines: Vec<&str> = listing.lines().collect();

    assert_eq!(lines.len(), MAZE.len() / 2);
    assert!(lines[0].starts_with("0200: A21E LD I, 0x21E"));
    assert!(lines[1].starts_with("0202: C201 RND V2, 0x01"));
    assert!(lines[12].starts_with("0218: 1218 JP 0x218"));
}

#[cfg(feature = "serde")]
#[test]
fn test_config_from_yaml() {
    let conf: Chip8Conf = serde_yaml::from_str(
        r#"
        memory_size: 8192
        clock_frequency: 1000
        font: vip
        rng_seed: 42
        quirks:
          shift_uses_vy: true
        "#,
    )
    .unwrap();

    assert_eq!(conf.memory_size, 8192);
    assert_eq!(conf.clock_frequency, Hz(1000));
    assert_eq!(conf.font, FontKind::CosmacVip);
    assert_eq!(conf.rng_seed, Some(42));
    assert!(conf.quirks.shift_uses_vy);
    assert!(!conf.quirks.jump_offset_uses_vx);
    assert_eq!(conf.program_start, MEM_START);

    let err = serde_yaml::from_str::<Chip8Conf>("font: amiga").unwrap_err();
    assert!(err.to_string().contains("amiga"));
}
