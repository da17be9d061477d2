use chip8::{constants::*, prelude::*, AddressStack, Instr, Memory, OpCode, Timers};
use proptest::prelude::*;

proptest! {
    #[test]
    fn decode_is_total(word in any::<u16>()) {
        let op = OpCode::decode(word);

        prop_assert!(op.t <= 0xF && op.x <= 0xF && op.y <= 0xF && op.n <= 0xF);
        prop_assert!(op.nnn <= 0xFFF);
        prop_assert_eq!(op.nn, (word & 0xFF) as u8);
        prop_assert_eq!(op.nnn, word & 0x0FFF);
        prop_assert_eq!(
            op.nnn,
            ((op.x as u16) << 8) | ((op.y as u16) << 4) | op.n as u16
        );
        prop_assert_eq!(op.word, word);
    }

    #[test]
    fn classification_keeps_opcode(word in any::<u16>()) {
        if let Err(op) = Instr::try_from(word) {
            prop_assert_eq!(op.word, word);
        }
    }

    #[test]
    fn stack_is_lifo(addrs in prop::collection::vec(any::<u16>(), 0..=STACK_SIZE)) {
        let mut stack = AddressStack::new(STACK_SIZE);
        for addr in &addrs {
            prop_assert!(stack.push(*addr).is_ok());
        }
        prop_assert_eq!(stack.depth(), addrs.len());

        for addr in addrs.iter().rev() {
            prop_assert_eq!(stack.pop().ok(), Some(*addr));
        }
        prop_assert!(stack.pop().is_err());
    }

    #[test]
    fn stack_overflows_past_capacity(capacity in 1_usize..32) {
        let mut stack = AddressStack::new(capacity);
        for addr in 0..capacity {
            prop_assert!(stack.push(addr as u16).is_ok());
        }
        prop_assert!(stack.push(0xFFF).is_err());
        prop_assert_eq!(stack.depth(), capacity);
    }

    #[test]
    fn fetch_short_is_big_endian(addr in 0_usize..MEM_SIZE - 1, a in any::<u8>(), b in any::<u8>()) {
        let mut memory = Memory::new(MEM_SIZE, FONTSET_START, MEM_START);
        memory.write(addr, a);
        memory.write(addr + 1, b);

        prop_assert_eq!(
            memory.fetch_short(addr),
            ((memory.read(addr) as u16) << 8) | memory.read(addr + 1) as u16
        );
        prop_assert_eq!(memory.fetch_short(addr), u16::from_be_bytes([a, b]));
    }

    #[test]
    fn timers_count_down_independently(delay in any::<u8>(), sound in any::<u8>()) {
        let mut timers = Timers::new();
        timers.delay = delay;
        timers.sound = sound;
        timers.decrement();

        prop_assert_eq!(timers.delay, delay.saturating_sub(1));
        prop_assert_eq!(timers.sound, sound.saturating_sub(1));
    }

    /// Arbitrary programs either run or fault, they never bring down the host.
    #[test]
    fn arbitrary_programs_never_panic(
        program in prop::collection::vec(any::<u8>(), 0..256),
        seed in any::<u64>(),
        keys in any::<u16>(),
    ) {
        let mut vm = Chip8Vm::new(Chip8Conf {
            rng_seed: Some(seed),
            ..Default::default()
        });
        vm.load_bytecode(&program).unwrap();

        let keypad = vm.keypad();
        for key in 0..16_u8 {
            if keys & (1 << key) != 0 {
                keypad.press(KeyCode::try_from(key).unwrap());
            }
        }

        for _ in 0..8 {
            match vm.update(1000.0 / 60.0) {
                Ok(()) => {}
                Err(Chip8Error::Runtime(fault)) => {
                    prop_assert_eq!(vm.fault(), Some(fault));
                    break;
                }
                Err(err) => prop_assert!(false, "unexpected error: {}", err),
            }
        }
    }
}
