/*!
# Instruction Set

## Operands

| Form | Meaning |
|---|---|
| `$R0`..`$R15` | Number register, integer or float. All start at `0`. |
| `$P0`..`$P7` | Picture register. Starts empty. |
| `12`, `-3`, `+4` | Integer literal. |
| `1.5`, `-0.25` | Float literal. |
| `"text"` | String. Kept verbatim apart from case folding. |
| `NAME` | Label reference. |
| `0`..`7` | Face register index, for the face commands. |

Arithmetic destinations may be written as a bare register index, so
`ADD 2 3 0` writes number register 0.

## Control

| Command | Effect |
|---|---|
| `NOP` | Nothing. |
| `HALT` | End the program. |
| `JUMP label` | Continue at `label`. |
| `PUSH_RETURN label` | Push the address of `label` on the return stack. |
| `POP_RETURN` | Pop the return stack into the return register. |
| `JUMP_RETURN` | Continue at the return register. |
| `BRANCH_EQ a b label` | Jump when `a = b`. Also `_NE`, `_GT`, `_LT`, `_GE`, `_LE`. |

Labels resolve when the jump runs. A missing label is a `CANNOT FIND
LABEL` software error on the line that tried to jump.

## Data

| Command | Effect |
|---|---|
| `STORE value $Rn` | Set a number register. |
| `COPY $Ra $Rb` | Copy register `a` into `b`. |
| `COPY_PIC $Pa $Pb` | Make `b` refer to the same picture as `a`. |
| `PUSH_NUM value` / `POP_NUM $Rn` | Number stack. |
| `PUSH_PIC $Pn` / `POP_PIC $Pn` | Picture stack. |

Stacks hold up to 65535 entries.

## Arithmetic

`ADD`, `SUB`, `MULT`, `DIV`, `IDIV`, `RDIV` take `a b destination`.
Two integers give an integer, anything with a float gives a float.
`DIV` always gives a float, `IDIV` rounds down, and the `RDIV`
remainder has the sign of the divisor. Dividing by zero is a
`DIVIDE BY ZERO` software error and leaves the destination alone.

## Flight

`TAKEOFF`, `LAND`, and `FORWARD`, `BACKWARD`, `LEFT`, `RIGHT`, `UP`,
`DOWN` in centimetres, `ROTATE_CW`, `ROTATE_CCW` in degrees. Floats are
truncated toward zero. A Tello accepts 20 to 500 centimetres and 1 to 360
degrees; anything it refuses is `COULD NOT COMPLETE MANEUVER`.

## Vision

| Command | Effect |
|---|---|
| `DISPLAY x` | Print a string or number, or show a picture. |
| `TAKE_PIC $Pn` | Store the latest camera frame. |
| `LOAD_PIC "file" $Pn` | Load a PNG or JPEG. |
| `DETECT_FACE $Pn face $Rn` | `1` and fill the face register when a face is found, else `0`. |
| `MATCH_FACE a b $Rn` | Similarity of two detected faces, 0.0 to 1.0. |

*/
