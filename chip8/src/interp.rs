//! Bytecode interpreter.
use rand::Rng;

use crate::{
    constants::*,
    cpu::Chip8Cpu,
    error::Fault,
    instr::Instr,
    registers::Register::{V0, VF},
    vm::Flow,
};

/// Instruction handlers
impl Chip8Cpu {
    /// Execute a single instruction.
    ///
    /// The program counter already points past the instruction,
    /// which was fetched from `addr`.
    pub(crate) fn execute(&mut self, instr: Instr, addr: Address) -> Result<Flow, Fault> {
        use Instr::*;

        let control_flow = match instr {
            // 00E0 (CLS)
            //
            // Clear display. The host still has to redraw the blank screen.
            Cls => {
                self.display.reset();
                self.display.mark_dirty();
                Flow::Draw
            }
            // 00EE (RET)
            //
            // Return from a subroutine.
            // Set the program counter to the address at the top of the stack.
            Ret => {
                self.pc = self
                    .stack
                    .pop()
                    .map_err(|_| Fault::StackUnderflow { addr })?;
                Flow::Jump
            }
            // 1NNN (JP addr)
            //
            // Jump to address.
            Jump { addr: nnn } => {
                self.pc = nnn;
                Flow::Jump
            }
            // 2NNN (CALL addr)
            //
            // Call subroutine at NNN.
            // The return address is the instruction after the call.
            Call { addr: nnn } => {
                let capacity = self.stack.capacity();
                self.stack
                    .push(self.pc)
                    .map_err(|_| Fault::StackOverflow { addr, capacity })?;
                self.pc = nnn;
                Flow::Jump
            }
            // 3XNN (SE Vx, byte)
            //
            // Skip the next instruction if register VX equals value NN.
            SkipEqImm { x, nn } => {
                self.skip_if(self.registers[x] == nn);
                Flow::Ok
            }
            // 4XNN (SNE Vx, byte)
            //
            // Skip the next instruction if register VX does not equal value NN.
            SkipNeImm { x, nn } => {
                self.skip_if(self.registers[x] != nn);
                Flow::Ok
            }
            // 5XY0 (SE Vx, Vy)
            SkipEq { x, y } => {
                self.skip_if(self.registers[x] == self.registers[y]);
                Flow::Ok
            }
            // 6XNN (LD Vx, byte)
            LoadImm { x, nn } => {
                self.registers[x] = nn;
                Flow::Ok
            }
            // 7XNN (ADD Vx, byte)
            //
            // Add value NN to register VX. Carry flag is not set.
            AddImm { x, nn } => {
                self.registers[x] = self.registers[x].wrapping_add(nn);
                Flow::Ok
            }
            // 8XY0 (LD Vx, Vy)
            Load { x, y } => {
                self.registers[x] = self.registers[y];
                Flow::Ok
            }
            // 8XY1 (OR Vx, Vy)
            Or { x, y } => {
                self.registers[x] |= self.registers[y];
                Flow::Ok
            }
            // 8XY2 (AND Vx, Vy)
            And { x, y } => {
                self.registers[x] &= self.registers[y];
                Flow::Ok
            }
            // 8XY3 (XOR Vx, Vy)
            Xor { x, y } => {
                self.registers[x] ^= self.registers[y];
                Flow::Ok
            }
            // 8XY4 (ADD Vx, Vy)
            //
            // Overflow is wrapped.
            // If overflow, set VF to 1, else 0.
            Add { x, y } => {
                let (result, carry) = self.registers[x].overflowing_add(self.registers[y]);
                self.set_with_flag(x, result, carry);
                Flow::Ok
            }
            // 8XY5 (SUB Vx, Vy)
            //
            // Subtracts VY from VX, and stores the result in VX.
            // VF is set to 0 when there is a borrow, set to 1 when there isn't.
            Sub { x, y } => {
                let (result, borrow) = self.registers[x].overflowing_sub(self.registers[y]);
                self.set_with_flag(x, result, !borrow);
                Flow::Ok
            }
            // 8XY6 (SHR Vx {, Vy})
            //
            // VF is set to the least-significant bit that is shifted out.
            ShiftRight { x, y } => {
                if self.quirks.shift_uses_vy {
                    self.registers[x] = self.registers[y];
                }
                let value = self.registers[x];
                self.set_with_flag(x, value >> 1, value & 1 == 1);
                Flow::Ok
            }
            // 8XY7 (SUBN Vx, Vy)
            //
            // Subtracts VX from VY, and stores the result in VX.
            // VF is set to 0 when there is a borrow, set to 1 when there isn't.
            SubN { x, y } => {
                let (result, borrow) = self.registers[y].overflowing_sub(self.registers[x]);
                self.set_with_flag(x, result, !borrow);
                Flow::Ok
            }
            // 8XYE (SHL Vx {, Vy})
            //
            // VF is set to the most-significant bit that is shifted out.
            ShiftLeft { x, y } => {
                if self.quirks.shift_uses_vy {
                    self.registers[x] = self.registers[y];
                }
                let value = self.registers[x];
                self.set_with_flag(x, value << 1, value >> 7 == 1);
                Flow::Ok
            }
            // 9XY0 (SNE Vx, Vy)
            SkipNe { x, y } => {
                self.skip_if(self.registers[x] != self.registers[y]);
                Flow::Ok
            }
            // ANNN (LD I, addr)
            LoadIndex { addr: nnn } => {
                self.registers.set_index(nnn);
                Flow::Ok
            }
            // BNNN (JP V0, addr)
            //
            // Jump to NNN offset by V0, or by VX when emulating CHIP-48.
            JumpOffset { x, addr: nnn } => {
                let offset = if self.quirks.jump_offset_uses_vx {
                    self.registers[x]
                } else {
                    self.registers[V0]
                };
                self.pc = nnn.wrapping_add(offset as Address);
                Flow::Jump
            }
            // CXNN (RND Vx, byte)
            //
            // Set register VX to the result of bitwise AND between a random number and NN.
            Random { x, nn } => {
                self.registers[x] = self.rng.gen::<u8>() & nn;
                Flow::Ok
            }
            // DXYN (DRW Vx, Vy, nibble)
            Draw { x, y, n } => {
                self.draw_sprite(x, y, n);
                Flow::Draw
            }
            // EX9E (SKP Vx)
            SkipKey { x } => {
                self.skip_if(self.keypad.is_pressed(self.registers[x]));
                Flow::Ok
            }
            // EXA1 (SKNP Vx)
            SkipNotKey { x } => {
                self.skip_if(!self.keypad.is_pressed(self.registers[x]));
                Flow::Ok
            }
            // FX07 (LD Vx, DT)
            LoadDelay { x } => {
                self.registers[x] = self.timers.delay;
                Flow::Ok
            }
            // FX0A (LD Vx, K)
            //
            // Wait for a key press, store the value of the key in Vx.
            // All execution stops until a key is pressed.
            WaitKey { x } => match self.keypad.first_key() {
                Some(key) => {
                    self.registers[x] = key;
                    Flow::Ok
                }
                None => {
                    // rewind the program counter to stall the machine
                    self.pc = self.pc.wrapping_sub(2);
                    Flow::KeyWait
                }
            },
            // FX15 (LD DT, Vx)
            SetDelay { x } => {
                self.timers.delay = self.registers[x];
                Flow::Ok
            }
            // FX18 (LD ST, Vx)
            SetSound { x } => {
                self.timers.sound = self.registers[x];
                Flow::Sound
            }
            // FX1E (ADD I, Vx)
            AddIndex { x } => {
                self.add_index(x);
                Flow::Ok
            }
            // FX29 (LD F, Vx)
            //
            // Set I = location of sprite for digit Vx.
            LoadFont { x } => {
                let digit = (self.registers[x] & 0xF) as usize;
                let addr = self.memory.font_start() + digit * FONTSET_HEIGHT;
                self.registers.set_index(addr as Address);
                Flow::Ok
            }
            // FX33 (LD B, Vx)
            //
            // Store the binary-coded decimal representation of Vx
            // in the memory locations I, I+1, and I+2.
            #[rustfmt::skip]
            Bcd { x } => {
                let addr = self.registers.index() as usize;
                let value = self.registers[x];
                self.memory.write(addr,     value / 100 % 10);
                self.memory.write(addr + 1, value / 10  % 10);
                self.memory.write(addr + 2, value       % 10);
                Flow::Ok
            }
            // FX55 (LD [I], Vx)
            //
            // Store registers V0 through Vx in memory starting at location I.
            Store { x } => {
                let addr = self.registers.index() as usize;
                for (offset, value) in self.registers.as_slice()[..=x as usize].iter().enumerate() {
                    self.memory.write(addr + offset, *value);
                }
                self.advance_index(x);
                Flow::Ok
            }
            // FX65 (LD Vx, [I])
            //
            // Read registers V0 through Vx from memory starting at location I.
            Restore { x } => {
                let addr = self.registers.index() as usize;
                for (offset, value) in self.registers.as_mut_slice()[..=x as usize]
                    .iter_mut()
                    .enumerate()
                {
                    *value = self.memory.read(addr + offset);
                }
                self.advance_index(x);
                Flow::Ok
            }
        };

        Ok(control_flow)
    }

    /// Skip over the next instruction.
    #[inline(always)]
    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.pc = self.pc.wrapping_add(2);
        }
    }

    /// Store an arithmetic result, then the flag.
    ///
    /// The flag is written last so it survives when VX is VF.
    #[inline(always)]
    fn set_with_flag(&mut self, x: u8, value: u8, flag: bool) {
        self.registers[x] = value;
        self.registers[VF] = flag as u8;
    }

    /// Draw sprite to the display buffer, at coordinate as per registers Vx and Vy.
    /// Sprite is encoded as 8 pixels wide, N pixels high, stored in bits located in
    /// memory pointed to by address register I.
    ///
    /// If the sprite is drawn outside of the display area, it is wrapped around to the other side.
    ///
    /// If the drawing operation erases existing pixels in the display buffer, register VF is set to
    /// 1, and set to 0 if no display bits are unset. This is used for collision detection.
    fn draw_sprite(&mut self, vx: u8, vy: u8, n: u8) {
        let (width, height) = (self.display.width(), self.display.height());
        let (x, y) = (self.registers[vx] as usize, self.registers[vy] as usize);
        let addr = self.registers.index() as usize;
        let mut is_erased = false;

        for r in 0..n as usize {
            // Each row is 8 bits representing the 8 pixels of the sprite.
            let row = self.memory.read(addr + r);

            for c in 0..SPRITE_WIDTH {
                if (row >> (7 - c)) & 1 == 0 {
                    continue;
                }

                let (px, py) = ((x + c) % width, (y + r) % height);
                let old_px = self.display.pixel(px, py);

                // XOR erases a pixel when both the old and new values are both 1.
                is_erased |= old_px;

                self.display.set_pixel(px, py, !old_px);
            }
        }

        // If a pixel was erased, then a collision occurred.
        self.registers[VF] = is_erased as u8;
    }

    fn add_index(&mut self, x: u8) {
        let sum = self.registers.index() as usize + self.registers[x] as usize;
        self.registers.set_index(sum as Address);

        if self.quirks.index_overflow_sets_vf {
            self.registers[VF] = (sum >= self.memory.capacity()) as u8;
        }
    }

    /// Block transfers on the COSMAC VIP leave I past the last register.
    fn advance_index(&mut self, x: u8) {
        if self.quirks.load_store_increments_index {
            let index = self.registers.index();
            self.registers
                .set_index(index.wrapping_add(x as Address + 1));
        }
    }
}
