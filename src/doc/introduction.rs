/*!
# Introductory Tutorial for DroneASM

Begin by opening a terminal and running `droneasm` with no arguments.
You get an interactive session. Every line you type that does not start
with a dot is appended to the listing; dot commands act on the listing.
Type `.quit` or CTRL-D to exit.

<pre><code>&nbsp;  DroneASM
&nbsp;  .help for commands
&nbsp;> █
</code></pre>

Stop a running program with CTRL-C. The vehicle lands and disconnects.

Let's fly a square. Type in the marked lines followed by ENTER.

<pre><code>&nbsp;> takeoff
&nbsp;> store 4 $r0
&nbsp;> side: forward 50
&nbsp;> rotate_ccw 90
&nbsp;> sub $r0 1 $r0
&nbsp;> branch_gt $r0 0 side
&nbsp;> land
&nbsp;> .run
&nbsp;> .path
&nbsp;   0 (0.0, 0.0, 0.0)
&nbsp;   1 (50.0, 0.0, 0.0)
&nbsp;   2 (50.0, 0.0, 0.0)
&nbsp;   3 (50.0, 50.0, 0.0)
&nbsp;   4 (50.0, 50.0, 0.0)
&nbsp;   5 (0.0, 50.0, 0.0)
&nbsp;   6 (0.0, 50.0, 0.0)
&nbsp;   7 (0.0, 0.0, 0.0)
&nbsp;   8 (0.0, 0.0, 0.0)
&nbsp;ENDED AT (0.0, 0.0, 0.0) AFTER 200.0 CM
</code></pre>

The path starts where the drone was switched on. Every move and every
turn adds a point, so a turn repeats the position before it.

Source is case insensitive and `#` starts a comment. A line is an optional
label, a command, and up to three operands separated by whitespace.

```text
START: STORE 3 $R1   # put 3 in number register 1
       DISPLAY $R1
```

By default programs run against a simulated drone that keeps track of
where it would be. Use `.live` to switch to a Tello on its own Wi-Fi
network, and `.sim` to switch back. From the command line:

```text
droneasm square.dasm            # simulate
droneasm --live square.dasm     # fly
droneasm --check square.dasm    # compile only
droneasm --show-dir shots face.dasm
```

`DISPLAY $Pn` prints a one line summary of the picture. With
`--show-dir` each displayed picture is also written there as a PNG.

The binary has no video decoder, so on a live Tello `TAKE_PIC` only
succeeds when a program embedding the library shares a frame mailbox
through `TelloConfig::frames` and publishes decoded frames into it.

Errors name their kind and the line they came from. Tokenizer and
validation errors stop a program from compiling at all. Software and
hardware errors stop a running program and land the drone.

```text
SOFTWARE ERROR IN 5; DIVIDE BY ZERO
```

*/
