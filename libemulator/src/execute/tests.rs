use libassembler::assemble;
use libdeassembler::DeassemblyError;
use libisa::instruction::encode;

use crate::{memory::Memory, run, Emulator, ExecuteErr};

#[test]
fn load_const() -> anyhow::Result<()> {
    let memory = exec("LOAD_CONST 0 10", 1)?;

    assert_eq!(memory.cell(0), Some(10));
    Ok(())
}

#[test]
fn composite_program() -> anyhow::Result<()> {
    let memory = exec(
        "LOAD_CONST 0 10\nLOAD_MEMORY 1 0\nSHIFT_RIGHT 1 0 1\nSHIFT_LEFT 1 0 1\n",
        14,
    )?;

    // 10 >> 10 clears cell 1, after which 10 << 0 restores it.
    assert_eq!(memory.cell(0), Some(10));
    assert_eq!(memory.cell(1), Some(10));
    assert!(memory.cells()[2..].iter().all(|&cell| cell == 0));
    Ok(())
}

#[test]
fn load_memory_copies() -> anyhow::Result<()> {
    let memory = exec("LOAD_CONST 5 123\nLOAD_MEMORY 2 5", 6)?;

    assert_eq!(memory.cell(2), Some(123));
    assert_eq!(memory.cell(5), Some(123));
    Ok(())
}

#[test]
fn store_memory_adds() -> anyhow::Result<()> {
    let memory = exec("LOAD_CONST 1 30\nLOAD_CONST 2 12\nSTORE_MEMORY 0 1 2", 3)?;

    assert_eq!(memory.cell(0), Some(42));
    Ok(())
}

#[test]
fn shifts_take_amount_from_memory() -> anyhow::Result<()> {
    let memory = exec(
        "LOAD_CONST 0 96\nLOAD_CONST 1 3\nSHIFT_RIGHT 2 0 1\nSHIFT_LEFT 3 0 1",
        4,
    )?;

    assert_eq!(memory.cell(2), Some(12));
    assert_eq!(memory.cell(3), Some(768));
    Ok(())
}

#[test]
fn destination_may_be_a_source() -> anyhow::Result<()> {
    let memory = exec("LOAD_CONST 0 5\nSTORE_MEMORY 0 0 0", 1)?;

    assert_eq!(memory.cell(0), Some(10));
    Ok(())
}

#[test]
fn empty_stream_leaves_memory_zeroed() -> anyhow::Result<()> {
    assert_eq!(run(&[], 8)?, Memory::new(8));
    Ok(())
}

#[test]
fn execution_is_deterministic() -> anyhow::Result<()> {
    let source = "LOAD_CONST 0 7\nLOAD_CONST 1 2\nSHIFT_LEFT 2 0 1\nSTORE_MEMORY 3 2 0";

    let first = exec(source, 4)?;
    let second = exec(source, 4)?;

    assert_eq!(first, second);
    assert_eq!(first.dump(0..4)?, second.dump(0..4)?);
    Ok(())
}

#[test]
fn malformed_stream_runs_nothing() -> anyhow::Result<()> {
    let mut code = assemble("LOAD_CONST 0 10")?.machine_code;
    code.push(0);

    let mut emulator = Emulator::new(4);
    let result = emulator.execute(&code);

    assert_eq!(
        result,
        Err(ExecuteErr::MalformedStream(DeassemblyError::MalformedStream {
            len: 8,
            trailing: 1,
        }))
    );
    assert_eq!(emulator.memory, Memory::new(4));
    assert_eq!(emulator.executed, 0);
    Ok(())
}

#[test]
fn unknown_opcode_halts_at_its_offset() -> anyhow::Result<()> {
    let mut code = assemble("LOAD_CONST 0 10\nLOAD_CONST 1 20")?.machine_code;
    code.extend(encode(3, 2, 0, 0)?);
    code.extend(assemble("LOAD_CONST 2 30")?.machine_code);

    let mut emulator = Emulator::new(4);
    let result = emulator.execute(&code);

    assert_eq!(result, Err(ExecuteErr::UnknownOpcode { opcode: 3, offset: 14 }));
    assert_eq!(result.unwrap_err().offset(), Some(14));

    // Instructions before the bad one keep their effects.
    assert_eq!(emulator.executed, 2);
    assert_eq!(emulator.memory.cells(), [10, 20, 0, 0]);
    Ok(())
}

#[test]
fn run_drops_partial_memory_that_execute_keeps() -> anyhow::Result<()> {
    let code = assemble("LOAD_CONST 0 7\nLOAD_CONST 9 1")?.machine_code;

    assert_eq!(
        run(&code, 2),
        Err(ExecuteErr::OutOfBounds { index: 9, offset: 7, memory_size: 2 })
    );

    let mut emulator = Emulator::new(2);
    assert!(emulator.execute(&code).is_err());
    assert_eq!(emulator.memory.cells(), [7, 0]);
    Ok(())
}

#[test]
fn opcode_zero_is_unknown() {
    let code = encode(0, 0, 0, 0).unwrap();

    assert_eq!(
        run(&code, 1),
        Err(ExecuteErr::UnknownOpcode { opcode: 0, offset: 0 })
    );
}

#[test]
fn destination_out_of_bounds() -> anyhow::Result<()> {
    let code = assemble("LOAD_CONST 0 1\nLOAD_CONST 4 1")?.machine_code;

    let mut emulator = Emulator::new(4);

    assert_eq!(
        emulator.execute(&code),
        Err(ExecuteErr::OutOfBounds {
            index: 4,
            offset: 7,
            memory_size: 4,
        })
    );
    assert_eq!(emulator.memory.cell(0), Some(1));
    Ok(())
}

#[test]
fn source_out_of_bounds() -> anyhow::Result<()> {
    for source in ["LOAD_MEMORY 0 2", "STORE_MEMORY 0 2 0", "SHIFT_RIGHT 0 0 2", "SHIFT_LEFT 0 2 1"] {
        let code = assemble(source)?.machine_code;

        assert_eq!(
            run(&code, 2),
            Err(ExecuteErr::OutOfBounds {
                index: 2,
                offset: 0,
                memory_size: 2,
            }),
            "{}",
            source
        );
    }
    Ok(())
}

#[test]
fn load_const_immediate_is_not_an_index() -> anyhow::Result<()> {
    let memory = exec("LOAD_CONST 0 262143", 1)?;

    assert_eq!(memory.cell(0), Some(262143));
    Ok(())
}

#[test]
fn zero_sized_memory() -> anyhow::Result<()> {
    assert_eq!(run(&[], 0)?.size(), 0);
    assert!(matches!(
        run(&assemble("LOAD_CONST 0 1")?.machine_code, 0),
        Err(ExecuteErr::OutOfBounds { index: 0, .. })
    ));
    Ok(())
}

#[test]
fn dump_after_run() -> anyhow::Result<()> {
    let mut emulator = Emulator::new(4);
    emulator.execute(&assemble("LOAD_CONST 1 9")?.machine_code)?;

    let mut csv = Vec::new();
    emulator.dump(0..2)?.write_csv(&mut csv)?;

    assert_eq!(String::from_utf8(csv)?, "Address,Value\n0,0\n1,9\n");
    assert!(emulator.dump(0..5).is_err());
    Ok(())
}

fn exec(source: &str, memory_size: usize) -> anyhow::Result<Memory> {
    let output = assemble(source)?;
    Ok(run(&output.machine_code, memory_size)?)
}
